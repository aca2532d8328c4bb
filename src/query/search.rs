// src/query/search.rs

use serde::Serialize;
use std::ops::Range;

use crate::schema::{Kind, Profile};
use crate::store::sort_by_name;

/// Maximum number of autocomplete suggestions.
pub const AUTOCOMPLETE_LIMIT: usize = 8;

/// Case-insensitive substring match on `nombre` or `candidato`.
fn matches(profile: &Profile, term_lower: &str) -> bool {
    profile.nombre.to_lowercase().contains(term_lower)
        || (!profile.candidato.is_empty()
            && profile.candidato.to_lowercase().contains(term_lower))
}

/// Profiles of `kind` whose name or candidate contains `term`, sorted by
/// name. An empty term selects the whole facet.
pub fn filter_profiles<'a>(profiles: &'a [Profile], kind: &Kind, term: &str) -> Vec<&'a Profile> {
    let term_lower = term.to_lowercase();
    let mut out: Vec<&Profile> = profiles
        .iter()
        .filter(|p| &p.kind == kind)
        .filter(|p| term_lower.is_empty() || matches(p, &term_lower))
        .collect();
    sort_by_name(&mut out);
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    pub profile: &'a Profile,
    /// Byte ranges of the term inside `profile.nombre`.
    pub name_spans: Vec<Range<usize>>,
    /// Byte ranges of the term inside `profile.candidato`.
    pub candidate_spans: Vec<Range<usize>>,
}

/// Up to eight suggestions for a partially typed term, taken from the
/// name-sorted matches. The term is trimmed first; a blank term suggests
/// nothing.
pub fn autocomplete<'a>(profiles: &'a [Profile], kind: &Kind, term: &str) -> Vec<Suggestion<'a>> {
    let term = term.trim();
    if term.is_empty() {
        return Vec::new();
    }
    filter_profiles(profiles, kind, term)
        .into_iter()
        .take(AUTOCOMPLETE_LIMIT)
        .map(|profile| Suggestion {
            profile,
            name_spans: highlight_spans(&profile.nombre, term),
            candidate_spans: highlight_spans(&profile.candidato, term),
        })
        .collect()
}

/// Length in bytes of a case-insensitive match of `needle` at `start`, if any.
fn match_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut k = 0;
    for (off, c) in text[start..].char_indices() {
        if k == needle.len() {
            return Some(off);
        }
        for lc in c.to_lowercase() {
            if needle.get(k) != Some(&lc) {
                return None;
            }
            k += 1;
        }
    }
    (k == needle.len()).then(|| text.len() - start)
}

/// Byte ranges of every non-overlapping, case-insensitive occurrence of
/// `term` in `text`, scanning left to right.
pub fn highlight_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match match_at(text, i, &needle) {
            Some(len) => {
                spans.push(i..i + len);
                i += len;
            }
            None => i += text[i..].chars().next().map_or(1, char::len_utf8),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::load_table;

    fn profiles() -> Vec<Profile> {
        let text = "id,tipo,nombre,candidato\n\
            1,partido,Perú Libre,Ana Pérez\n\
            2,partido,Acción Popular,Luis Peralta\n\
            3,partido,Fuerza Nueva,\n\
            4,candidato,Pedro Perales,Pedro Perales\n\
            5,partido,Somos Perú,\n";
        load_table(text)
            .records
            .into_iter()
            .map(Profile::from_record)
            .collect()
    }

    fn names(ps: &[&Profile]) -> Vec<String> {
        ps.iter().map(|p| p.nombre.clone()).collect()
    }

    #[test]
    fn test_filter_is_facet_subset() {
        let all = profiles();
        let found = filter_profiles(&all, &Kind::Partido, "per");
        assert_eq!(names(&found), vec!["Acción Popular", "Perú Libre", "Somos Perú"]);
        assert!(found.iter().all(|p| p.kind == Kind::Partido));
    }

    #[test]
    fn test_empty_term_returns_sorted_facet() {
        let all = profiles();
        let found = filter_profiles(&all, &Kind::Partido, "");
        assert_eq!(
            names(&found),
            vec!["Acción Popular", "Fuerza Nueva", "Perú Libre", "Somos Perú"]
        );
        assert_eq!(filter_profiles(&all, &Kind::Candidato, "").len(), 1);
    }

    #[test]
    fn test_filter_term_is_not_trimmed() {
        let all = profiles();
        assert!(filter_profiles(&all, &Kind::Partido, " perú ").is_empty());
        assert_eq!(filter_profiles(&all, &Kind::Partido, "PERÚ").len(), 2);
    }

    #[test]
    fn test_autocomplete() {
        let all = profiles();
        assert!(autocomplete(&all, &Kind::Partido, "   ").is_empty());

        let s = autocomplete(&all, &Kind::Partido, "  pér ");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].profile.id, "1");
        assert!(s[0].name_spans.is_empty());
        assert_eq!(s[0].candidate_spans, vec![4..8]);
    }

    #[test]
    fn test_autocomplete_caps_results() {
        let text: String = std::iter::once("id,tipo,nombre\n".to_string())
            .chain((0..12).rev().map(|i| format!("{},partido,Partido {}\n", i, (b'a' + i) as char)))
            .collect();
        let all: Vec<Profile> = load_table(&text)
            .records
            .into_iter()
            .map(Profile::from_record)
            .collect();
        let s = autocomplete(&all, &Kind::Partido, "partido");
        assert_eq!(s.len(), AUTOCOMPLETE_LIMIT);
        // sorted first, then capped: "Partido a" through "Partido h"
        let ids: Vec<&str> = s.iter().map(|x| x.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_highlight_spans() {
        assert_eq!(highlight_spans("Perú Libre", "per"), vec![0..3]);
        assert_eq!(highlight_spans("aaaa", "aa"), vec![0..2, 2..4]);
        assert_eq!(highlight_spans("Ana Pérez", "PÉR"), vec![4..8]);
        assert_eq!(highlight_spans("Somos Perú", "ú"), vec![9..11]);
        assert!(highlight_spans("abc", "").is_empty());
        assert!(highlight_spans("abc", "abcd").is_empty());
    }
}
