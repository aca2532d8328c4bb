// src/query/collate.rs
//
// Spanish-aware ordering for display names. Three levels, compared in
// turn: base letters (ñ sorts between n and o), accents, then case with
// lowercase first.

use std::cmp::Ordering;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::with_capacity(s.len()),
            secondary: Vec::with_capacity(s.len()),
            tertiary: Vec::with_capacity(s.len()),
        };

        for c in s.nfc() {
            let upper = c.is_uppercase() as u8;
            for lc in c.to_lowercase() {
                if lc == 'ñ' {
                    key.push_base('n' as u32 * 2 + 1, upper);
                    continue;
                }
                for d in std::iter::once(lc).nfd() {
                    if is_combining_mark(d) {
                        if let Some(last) = key.secondary.last_mut() {
                            *last = d as u32;
                        }
                    } else {
                        key.push_base(d as u32 * 2, upper);
                    }
                }
            }
        }
        key
    }

    fn push_base(&mut self, weight: u32, upper: u8) {
        self.primary.push(weight);
        self.secondary.push(0);
        self.tertiary.push(upper);
    }
}

/// Compare two strings in Spanish collation order. Strings with identical
/// keys fall back to code point order so the result is total.
pub fn spanish_cmp(a: &str, b: &str) -> Ordering {
    CollationKey::new(a)
        .cmp(&CollationKey::new(b))
        .then_with(|| a.cmp(b))
}

/// Sort strings in place, Spanish collation order.
pub fn sort_spanish(values: &mut [String]) {
    values.sort_by_cached_key(|v| CollationKey::new(v));
}
