//! Voices and kits
//!
//! A `Voice` binds one trigger key to one drum sound. A `Kit` is the ordered,
//! non-empty set of voices available to the board; it is fixed once built.

use crate::types::drum::DrumSound;
use anyhow::{anyhow, bail, Result};
use std::fmt;

/// Trigger key identifying a voice, stored lower-case
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceKey(char);

impl VoiceKey {
    /// Create a key from a character (case-insensitive).
    /// Returns None for anything that is not a single alphanumeric character.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_alphanumeric() {
            Some(VoiceKey(c.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Parse a key from a one-character string
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    /// Upper-case form used on displays
    pub fn display_char(&self) -> char {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for VoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_char())
    }
}

/// One playable drum sound bound to a trigger key
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    pub key: VoiceKey,
    pub sound: DrumSound,
}

impl Voice {
    pub fn new(key: VoiceKey, sound: DrumSound) -> Self {
        Self { key, sound }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.sound)
    }
}

/// Ordered, non-empty set of voices with unique keys
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kit {
    voices: Vec<Voice>,
}

impl Kit {
    /// Build a kit, rejecting empty sets and duplicate keys
    pub fn new(voices: Vec<Voice>) -> Result<Self> {
        if voices.is_empty() {
            bail!("A kit needs at least one voice");
        }
        for (i, voice) in voices.iter().enumerate() {
            if voices[..i].iter().any(|v| v.key == voice.key) {
                bail!("Key '{}' is bound twice", voice.key);
            }
        }
        Ok(Self { voices })
    }

    /// The seven-piece kit: four toms on the left hand, snare, kick and crash
    /// on the right.
    pub fn standard() -> Self {
        let layout = [
            ('w', DrumSound::Tom1),
            ('a', DrumSound::Tom2),
            ('s', DrumSound::Tom3),
            ('d', DrumSound::Tom4),
            ('j', DrumSound::Snare),
            ('k', DrumSound::Kick),
            ('l', DrumSound::Crash),
        ];
        let voices = layout
            .iter()
            .filter_map(|&(c, sound)| VoiceKey::new(c).map(|key| Voice::new(key, sound)))
            .collect();
        Self { voices }
    }

    /// Parse a kit from `key=sound` entries separated by whitespace or commas,
    /// e.g. `"w=tom1 j=snare k=kick"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut voices = Vec::new();
        for entry in spec
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|e| !e.is_empty())
        {
            let (key, sound) = entry
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=sound, got '{}'", entry))?;
            let key = VoiceKey::parse(key)
                .ok_or_else(|| anyhow!("Invalid key '{}': use a single letter or digit", key))?;
            let sound = DrumSound::from_name(sound)
                .ok_or_else(|| anyhow!("Unknown drum sound '{}'", sound))?;
            voices.push(Voice::new(key, sound));
        }
        Self::new(voices)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Keys in kit order
    pub fn keys(&self) -> Vec<VoiceKey> {
        self.voices.iter().map(|v| v.key).collect()
    }

    pub fn get(&self, key: VoiceKey) -> Option<&Voice> {
        self.voices.iter().find(|v| v.key == key)
    }

    pub fn contains(&self, key: VoiceKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl Default for Kit {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> VoiceKey {
        VoiceKey::new(c).unwrap()
    }

    #[test]
    fn test_voice_key_normalizes_case() {
        assert_eq!(VoiceKey::new('W'), VoiceKey::new('w'));
        assert_eq!(key('w').to_string(), "W");
        assert_eq!(VoiceKey::new(' '), None);
        assert_eq!(VoiceKey::parse("ab"), None);
        assert_eq!(VoiceKey::parse(" k "), Some(key('k')));
    }

    #[test]
    fn test_standard_kit_order() {
        let kit = Kit::standard();
        let keys: String = kit.keys().iter().map(|k| k.as_char()).collect();
        assert_eq!(keys, "wasdjkl");
        assert_eq!(kit.get(key('k')).unwrap().sound, DrumSound::Kick);
        assert_eq!(kit.get(key('l')).unwrap().sound, DrumSound::Crash);
        assert!(!kit.contains(key('x')));
    }

    #[test]
    fn test_parse_kit() {
        let kit = Kit::parse("q=kick, w=snare  e=hh").unwrap();
        assert_eq!(kit.len(), 3);
        assert_eq!(kit.voices()[2].sound, DrumSound::HiHat);
    }

    #[test]
    fn test_parse_kit_errors() {
        assert!(Kit::parse("").is_err());
        assert!(Kit::parse("q").is_err());
        assert!(Kit::parse("q=triangle").is_err());
        assert!(Kit::parse("qq=kick").is_err());
        assert!(Kit::parse("q=kick Q=snare").is_err());
    }
}
