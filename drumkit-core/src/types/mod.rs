// drumkit-core/src/types/mod.rs

pub mod drum;
pub mod pattern;
pub mod voice;

pub use drum::DrumSound;
pub use pattern::{Pattern, Symbol, REST_GLYPH};
pub use voice::{Kit, Voice, VoiceKey};
