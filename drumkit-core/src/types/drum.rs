//! Drum sound types
//!
//! Provides `DrumSound`, the percussion timbre a pad is bound to, with
//! short names used by kit specifications.

use std::fmt;

/// Percussion sound a voice can trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumSound {
    /// Bass drum
    Kick,
    /// Acoustic snare
    Snare,
    /// High rack tom
    Tom1,
    /// Mid rack tom
    Tom2,
    /// Low tom
    Tom3,
    /// Floor tom
    Tom4,
    /// Crash cymbal
    Crash,
    /// Closed hi-hat
    HiHat,
    /// Hand clap
    Clap,
}

impl DrumSound {
    pub const ALL: [DrumSound; 9] = [
        DrumSound::Kick,
        DrumSound::Snare,
        DrumSound::Tom1,
        DrumSound::Tom2,
        DrumSound::Tom3,
        DrumSound::Tom4,
        DrumSound::Crash,
        DrumSound::HiHat,
        DrumSound::Clap,
    ];

    /// Parse drum sound from a name or common abbreviation
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kick" | "kick-bass" | "bd" | "bass" => Some(DrumSound::Kick),
            "snare" | "sn" | "sd" => Some(DrumSound::Snare),
            "tom1" | "tom-1" | "ht" => Some(DrumSound::Tom1),
            "tom2" | "tom-2" | "mt" => Some(DrumSound::Tom2),
            "tom3" | "tom-3" | "lt" => Some(DrumSound::Tom3),
            "tom4" | "tom-4" | "ft" => Some(DrumSound::Tom4),
            "crash" | "cr" => Some(DrumSound::Crash),
            "hihat" | "hh" | "ch" => Some(DrumSound::HiHat),
            "clap" | "cp" => Some(DrumSound::Clap),
            _ => None,
        }
    }

    /// Get short display name for the drum
    pub fn short_name(&self) -> &'static str {
        match self {
            DrumSound::Kick => "kick-bass",
            DrumSound::Snare => "snare",
            DrumSound::Tom1 => "tom-1",
            DrumSound::Tom2 => "tom-2",
            DrumSound::Tom3 => "tom-3",
            DrumSound::Tom4 => "tom-4",
            DrumSound::Crash => "crash",
            DrumSound::HiHat => "hihat",
            DrumSound::Clap => "clap",
        }
    }
}

impl fmt::Display for DrumSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
