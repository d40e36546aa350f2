//! Runtime settings for rhythm generation and playback

use crate::generator::{DEFAULT_HIT_PROBABILITY, DEFAULT_LENGTH};
use crate::playback::PlaybackMode;
use anyhow::{bail, Result};
use std::time::Duration;

/// Longest rhythm the board will generate
pub const MAX_LENGTH: usize = 64;
/// Shortest allowed step interval in milliseconds
pub const MIN_INTERVAL_MS: u64 = 10;
/// Longest allowed step interval in milliseconds
pub const MAX_INTERVAL_MS: u64 = 10_000;

/// Settings used when a trigger does not override them
#[derive(Clone, Debug, PartialEq)]
pub struct TrainerConfig {
    /// Steps per generated rhythm
    pub length: usize,
    /// Chance that a generated step is a hit
    pub hit_probability: f64,
    /// Time between steps in audible playback
    pub audible_interval: Duration,
    /// Time between steps in teach mode
    pub teach_interval: Duration,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            hit_probability: DEFAULT_HIT_PROBABILITY,
            audible_interval: PlaybackMode::Audible.default_interval(),
            teach_interval: PlaybackMode::Teach.default_interval(),
        }
    }
}

impl TrainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rhythm length (clamped to `MAX_LENGTH`)
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.min(MAX_LENGTH);
        self
    }

    /// Set the hit probability (clamped to [0, 1])
    pub fn with_hit_probability(mut self, p: f64) -> Self {
        self.hit_probability = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self
    }

    /// Set the step interval for one mode (clamped to the allowed range)
    pub fn with_interval(mut self, mode: PlaybackMode, interval: Duration) -> Self {
        let ms = (interval.as_millis() as u64).clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);
        *self.interval_mut(mode) = Duration::from_millis(ms);
        self
    }

    pub fn interval(&self, mode: PlaybackMode) -> Duration {
        match mode {
            PlaybackMode::Audible => self.audible_interval,
            PlaybackMode::Teach => self.teach_interval,
        }
    }

    fn interval_mut(&mut self, mode: PlaybackMode) -> &mut Duration {
        match mode {
            PlaybackMode::Audible => &mut self.audible_interval,
            PlaybackMode::Teach => &mut self.teach_interval,
        }
    }

    /// Set the rhythm length, rejecting out-of-range values
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        if length > MAX_LENGTH {
            bail!("Length must be between 0 and {}", MAX_LENGTH);
        }
        self.length = length;
        Ok(())
    }

    /// Set the hit probability, rejecting values outside [0, 1]
    pub fn set_hit_probability(&mut self, p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            bail!("Density must be between 0.0 and 1.0");
        }
        self.hit_probability = p;
        Ok(())
    }

    /// Set one mode's step interval, rejecting out-of-range values
    pub fn set_interval(&mut self, mode: PlaybackMode, interval: Duration) -> Result<()> {
        let ms = interval.as_millis() as u64;
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&ms) {
            bail!(
                "Interval must be between {} and {} ms",
                MIN_INTERVAL_MS,
                MAX_INTERVAL_MS
            );
        }
        *self.interval_mut(mode) = interval;
        Ok(())
    }

    /// Apply per-trigger overrides on top of these settings
    pub fn resolve(&self, mode: PlaybackMode, overrides: &Overrides) -> Resolved {
        let base = self.clone();
        let base = match overrides.length {
            Some(length) => base.with_length(length),
            None => base,
        };
        let base = match overrides.hit_probability {
            Some(p) => base.with_hit_probability(p),
            None => base,
        };
        let base = match overrides.interval {
            Some(interval) => base.with_interval(mode, interval),
            None => base,
        };
        Resolved {
            length: base.length,
            hit_probability: base.hit_probability,
            interval: base.interval(mode),
        }
    }
}

/// Optional per-trigger settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub length: Option<usize>,
    pub hit_probability: Option<f64>,
    pub interval: Option<Duration>,
}

impl Overrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn hit_probability(mut self, p: f64) -> Self {
        self.hit_probability = Some(p);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

/// Concrete settings for one trigger
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved {
    pub length: usize,
    pub hit_probability: f64,
    pub interval: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.length, 8);
        assert_eq!(config.hit_probability, 0.7);
        assert_eq!(config.audible_interval, Duration::from_millis(400));
        assert_eq!(config.teach_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_builder_clamps() {
        let config = TrainerConfig::new()
            .with_length(500)
            .with_hit_probability(1.5)
            .with_interval(PlaybackMode::Teach, Duration::from_millis(1));
        assert_eq!(config.length, MAX_LENGTH);
        assert_eq!(config.hit_probability, 1.0);
        assert_eq!(config.teach_interval, Duration::from_millis(MIN_INTERVAL_MS));
        assert_eq!(config.audible_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_setters_validate() {
        let mut config = TrainerConfig::new();
        assert!(config.set_length(16).is_ok());
        assert!(config.set_length(65).is_err());
        assert!(config.set_hit_probability(0.25).is_ok());
        assert!(config.set_hit_probability(-0.1).is_err());
        assert!(config.set_hit_probability(f64::NAN).is_err());
        assert!(config
            .set_interval(PlaybackMode::Audible, Duration::from_millis(250))
            .is_ok());
        assert!(config
            .set_interval(PlaybackMode::Audible, Duration::from_secs(60))
            .is_err());

        assert_eq!(config.length, 16);
        assert_eq!(config.hit_probability, 0.25);
        assert_eq!(config.audible_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_resolve_overrides() {
        let config = TrainerConfig::default();
        let plain = config.resolve(PlaybackMode::Teach, &Overrides::none());
        assert_eq!(plain.length, 8);
        assert_eq!(plain.interval, Duration::from_millis(1000));

        let custom = config.resolve(
            PlaybackMode::Audible,
            &Overrides::none()
                .length(4)
                .hit_probability(0.5)
                .interval(Duration::from_millis(200)),
        );
        assert_eq!(custom.length, 4);
        assert_eq!(custom.hit_probability, 0.5);
        assert_eq!(custom.interval, Duration::from_millis(200));
    }
}
