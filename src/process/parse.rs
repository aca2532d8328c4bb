// src/process/parse.rs

/// Rows of raw cells, exactly as they appear in the CSV text.
pub type Grid = Vec<Vec<String>>;

/// Accumulates cells and rows while the scanner walks the input.
#[derive(Default)]
struct GridBuilder {
    rows: Grid,
    row: Vec<String>,
    cell: String,
}

impl GridBuilder {
    fn end_cell(&mut self) {
        self.row.push(std::mem::take(&mut self.cell));
    }

    /// Close the current row. Rows made only of blank cells are separator
    /// lines and never reach the grid.
    fn end_row(&mut self) {
        self.end_cell();
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|c| !c.trim().is_empty()) {
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> Grid {
        if !self.cell.is_empty() || !self.row.is_empty() {
            self.end_row();
        }
        self.rows
    }
}

/// Parse CSV text into a grid of cells.
///
/// Quoted cells may contain commas, line breaks and doubled quotes (`""`),
/// which decode to a single `"`. Outside quotes `\n`, `\r\n` and a lone `\r`
/// all terminate a row. Blank rows are dropped and a final row without a
/// trailing newline is still captured.
pub fn parse(text: &str) -> Grid {
    let mut b = GridBuilder::default();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    b.cell.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => b.end_cell(),
            '\n' if !in_quotes => b.end_row(),
            '\r' if !in_quotes => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                b.end_row();
            }
            _ => b.cell.push(ch),
        }
    }

    b.finish()
}

/// Split a single CSV line into cells. Line terminators are ordinary
/// characters here; use [`parse`] for whole documents.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => out.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    out.push(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_simple_rows() {
        let grid = parse("id,nombre\n1,Alfa\n2,Beta\n");
        assert_eq!(
            grid,
            vec![row(&["id", "nombre"]), row(&["1", "Alfa"]), row(&["2", "Beta"])]
        );
    }

    #[test]
    fn test_quoted_cell_with_comma_newline_and_quote() {
        let grid = parse("a,b\n1,\"a,b\nc\"\"d\"\n");
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][1], "a,b\nc\"d");
    }

    #[test]
    fn test_line_terminators() {
        let grid = parse("a,b\r\n1,2\r3,4\n5,6");
        assert_eq!(
            grid,
            vec![row(&["a", "b"]), row(&["1", "2"]), row(&["3", "4"]), row(&["5", "6"])]
        );
    }

    #[test]
    fn test_crlf_inside_quotes_is_kept() {
        let grid = parse("x\n\"uno\r\ndos\"\n");
        assert_eq!(grid[1][0], "uno\r\ndos");
    }

    #[test]
    fn test_trailing_row_without_newline() {
        let grid = parse("h1,h2\nlast,row");
        assert_eq!(grid.last(), Some(&row(&["last", "row"])));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\r\n\r").is_empty());
    }

    #[test]
    fn test_blank_rows_dropped_even_with_full_width() {
        let grid = parse("a,b,c\n , ,\n,,\n1,2,3\n");
        assert_eq!(grid, vec![row(&["a", "b", "c"]), row(&["1", "2", "3"])]);
    }

    #[test]
    fn test_row_with_single_nonblank_cell_kept() {
        let grid = parse("a,b\n,x\n");
        assert_eq!(grid[1], row(&["", "x"]));
    }

    #[test]
    fn test_trailing_comma_at_eof_flushes_empty_cell() {
        let grid = parse("a,");
        assert_eq!(grid, vec![row(&["a", ""])]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "tipo,nombre\npartido,\"Uno, Dos\"\ncandidato,\"Tres\nCuatro\"";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("a,\"b,c\",d"), row(&["a", "b,c", "d"]));
        assert_eq!(parse_line("\"x\"\"y\","), row(&["x\"y", ""]));
        assert_eq!(parse_line("uno\ndos"), row(&["uno\ndos"]));
    }
}
