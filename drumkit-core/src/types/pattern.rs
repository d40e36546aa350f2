//! Rhythm patterns
//!
//! A `Pattern` is a fixed sequence of hit-or-rest steps. Patterns render as a
//! space-separated line with upper-case keys for hits and an en-dash for rests.

use crate::types::voice::VoiceKey;
use anyhow::{anyhow, Result};
use std::fmt;

/// Glyph shown for a rest step. Not a hyphen, so it never reads as a minus
/// sign or list bullet.
pub const REST_GLYPH: char = '–';

/// A single pattern step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Hit(VoiceKey),
    Rest,
}

impl Symbol {
    pub fn is_rest(&self) -> bool {
        matches!(self, Symbol::Rest)
    }

    pub fn voice(&self) -> Option<VoiceKey> {
        match self {
            Symbol::Hit(key) => Some(*key),
            Symbol::Rest => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Hit(key) => write!(f, "{}", key),
            Symbol::Rest => write!(f, "{}", REST_GLYPH),
        }
    }
}

/// An immutable rhythm: hits and rests in playing order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    steps: Vec<Symbol>,
}

impl Pattern {
    pub fn new(steps: Vec<Symbol>) -> Self {
        Self { steps }
    }

    /// Parse a pattern written as whitespace-separated steps. Rests may be
    /// written as `–`, `-`, `_` or `.`; hits as their single-character key.
    pub fn parse(input: &str) -> Result<Self> {
        let steps = input
            .split_whitespace()
            .map(|word| match word {
                "–" | "-" | "_" | "." => Ok(Symbol::Rest),
                _ => VoiceKey::parse(word)
                    .map(Symbol::Hit)
                    .ok_or_else(|| anyhow!("Invalid step '{}'", word)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of hit steps
    pub fn hits(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_rest()).count()
    }

    /// Number of rest steps
    pub fn rests(&self) -> usize {
        self.steps.iter().filter(|s| s.is_rest()).count()
    }

    /// Render for display, e.g. `W – K J`
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<Symbol> for Pattern {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(c: char) -> Symbol {
        Symbol::Hit(VoiceKey::new(c).unwrap())
    }

    #[test]
    fn test_format_rest_glyph_and_uppercase() {
        let pattern = Pattern::new(vec![Symbol::Rest, hit('w'), Symbol::Rest]);
        assert_eq!(pattern.format(), "– W –");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(Pattern::default().format(), "");
    }

    #[test]
    fn test_format_is_repeatable() {
        let pattern = Pattern::new(vec![hit('k'), hit('j'), Symbol::Rest, hit('l')]);
        let first = pattern.format();
        let _ = Pattern::new(vec![hit('a')]).format();
        assert_eq!(pattern.format(), first);
        assert_eq!(first, "K J – L");
    }

    #[test]
    fn test_parse_accepts_rest_spellings() {
        let pattern = Pattern::parse("W - K _ . –").unwrap();
        assert_eq!(pattern.len(), 6);
        assert_eq!(pattern.hits(), 2);
        assert_eq!(pattern.rests(), 4);
        assert_eq!(pattern.format(), "W – K – – –");
    }

    #[test]
    fn test_parse_rejects_words() {
        assert!(Pattern::parse("w kick").is_err());
        assert!(Pattern::parse("w ?").is_err());
    }
}
