//! Random rhythm generation

use crate::types::{Pattern, Symbol, VoiceKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Steps in a generated rhythm unless overridden
pub const DEFAULT_LENGTH: usize = 8;

/// Chance that a generated step is a hit rather than a rest
pub const DEFAULT_HIT_PROBABILITY: f64 = 0.7;

/// Produces random hit-or-rest patterns from a set of voices
pub struct PatternGenerator {
    rng: StdRng,
}

impl PatternGenerator {
    /// Generator seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator, same seed gives the same sequence of patterns
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `length` steps. Each step is independently a hit with
    /// probability `hit_probability` (clamped to [0, 1]), drawing the voice
    /// uniformly from `voices`. With no voices every step is a rest.
    pub fn generate(&mut self, length: usize, hit_probability: f64, voices: &[VoiceKey]) -> Pattern {
        let p = if hit_probability.is_nan() {
            0.0
        } else {
            hit_probability.clamp(0.0, 1.0)
        };

        (0..length)
            .map(|_| {
                let roll: f64 = self.rng.gen();
                if roll < p && !voices.is_empty() {
                    Symbol::Hit(voices[self.rng.gen_range(0..voices.len())])
                } else {
                    Symbol::Rest
                }
            })
            .collect()
    }

    /// Generate with the default length and density
    pub fn generate_default(&mut self, voices: &[VoiceKey]) -> Pattern {
        self.generate(DEFAULT_LENGTH, DEFAULT_HIT_PROBABILITY, voices)
    }
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Kit;

    #[test]
    fn test_exact_length_and_alphabet() {
        let kit = Kit::standard();
        let keys = kit.keys();
        let mut generator = PatternGenerator::seeded(7);

        for length in [0, 1, 8, 33] {
            let pattern = generator.generate(length, 0.5, &keys);
            assert_eq!(pattern.len(), length);
            for step in &pattern {
                match step {
                    Symbol::Rest => {}
                    Symbol::Hit(key) => assert!(kit.contains(*key)),
                }
            }
        }
    }

    #[test]
    fn test_default_length() {
        let keys = Kit::standard().keys();
        let pattern = PatternGenerator::seeded(1).generate_default(&keys);
        assert_eq!(pattern.len(), DEFAULT_LENGTH);
    }

    #[test]
    fn test_probability_extremes() {
        let keys = Kit::standard().keys();
        let mut generator = PatternGenerator::seeded(42);

        assert_eq!(generator.generate(200, 1.0, &keys).rests(), 0);
        assert_eq!(generator.generate(200, 0.0, &keys).hits(), 0);
        // Out-of-range probabilities clamp
        assert_eq!(generator.generate(50, 3.5, &keys).rests(), 0);
        assert_eq!(generator.generate(50, -1.0, &keys).hits(), 0);
        assert_eq!(generator.generate(50, f64::NAN, &keys).hits(), 0);
    }

    #[test]
    fn test_hit_fraction_tracks_probability() {
        let keys = Kit::standard().keys();
        let mut generator = PatternGenerator::seeded(2024);

        for p in [0.1, 0.7, 0.9] {
            let mut hits = 0;
            let trials = 500;
            for _ in 0..trials {
                hits += generator.generate(8, p, &keys).hits();
            }
            let fraction = hits as f64 / (trials * 8) as f64;
            assert!(
                (fraction - p).abs() < 0.05,
                "hit fraction {} too far from {}",
                fraction,
                p
            );
        }
    }

    #[test]
    fn test_voices_drawn_uniformly() {
        let keys = Kit::standard().keys();
        let mut generator = PatternGenerator::seeded(99);
        let pattern = generator.generate(7000, 1.0, &keys);

        for key in &keys {
            let count = pattern.iter().filter(|s| s.voice() == Some(*key)).count();
            assert!((800..1200).contains(&count), "{} drawn {} times", key, count);
        }
    }

    #[test]
    fn test_no_voices_gives_rests() {
        let pattern = PatternGenerator::seeded(3).generate(5, 1.0, &[]);
        assert_eq!(pattern.rests(), 5);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let keys = Kit::standard().keys();
        let a = PatternGenerator::seeded(5).generate(16, 0.7, &keys);
        let b = PatternGenerator::seeded(5).generate(16, 0.7, &keys);
        assert_eq!(a, b);
    }
}
