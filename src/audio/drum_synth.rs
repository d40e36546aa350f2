//! Drum synthesizer module
//!
//! Provides `DrumOscillator`, a one-shot synthesized percussion voice for
//! each `DrumSound` on the board.

use drumkit_core::types::DrumSound;
use std::f32::consts::PI;

/// Simple xorshift PRNG for noise generation
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Random f32 in range [-1.0, 1.0)
    fn noise(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Length of each one-shot in milliseconds
fn duration_ms(sound: DrumSound) -> f32 {
    match sound {
        DrumSound::Kick => 300.0,
        DrumSound::Snare => 200.0,
        DrumSound::Tom1 | DrumSound::Tom2 => 250.0,
        DrumSound::Tom3 | DrumSound::Tom4 => 350.0,
        DrumSound::Crash => 800.0,
        DrumSound::HiHat => 80.0,
        DrumSound::Clap => 150.0,
    }
}

/// Resting pitch of each tom, highest to lowest
fn tom_pitch(sound: DrumSound) -> f32 {
    match sound {
        DrumSound::Tom1 => 200.0,
        DrumSound::Tom2 => 160.0,
        DrumSound::Tom3 => 120.0,
        _ => 90.0,
    }
}

/// A one-shot drum oscillator
pub struct DrumOscillator {
    sound: DrumSound,
    sample_rate: f32,
    sample_count: usize,
    max_samples: usize,
    rng: SimpleRng,
    last_noise: f32,
    /// High-pass filter state for cymbals
    hp_state: f32,
}

impl DrumOscillator {
    pub fn new(sound: DrumSound, sample_rate: f32) -> Self {
        let max_samples = (duration_ms(sound) * sample_rate / 1000.0) as usize;
        let seed = (sound as u32 + 1).wrapping_mul(7919);

        Self {
            sound,
            sample_rate,
            sample_count: 0,
            max_samples,
            rng: SimpleRng::new(seed),
            last_noise: 0.0,
            hp_state: 0.0,
        }
    }

    pub fn sound(&self) -> DrumSound {
        self.sound
    }

    #[inline]
    fn time(&self) -> f32 {
        self.sample_count as f32 / self.sample_rate
    }

    pub fn is_finished(&self) -> bool {
        self.sample_count >= self.max_samples
    }

    /// Rewind to the first sample so the hit sounds again from its attack
    pub fn restart(&mut self) {
        self.sample_count = 0;
        self.last_noise = 0.0;
        self.hp_state = 0.0;
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let sample = match self.sound {
            DrumSound::Kick => self.kick(),
            DrumSound::Snare => self.snare(),
            DrumSound::Tom1 | DrumSound::Tom2 | DrumSound::Tom3 | DrumSound::Tom4 => self.tom(),
            DrumSound::Crash => self.crash(),
            DrumSound::HiHat => self.hihat(),
            DrumSound::Clap => self.clap(),
        };

        self.sample_count += 1;
        sample
    }

    /// Kick drum: sine wave with pitch sweep
    fn kick(&self) -> f32 {
        let t = self.time();

        // Pitch sweep from ~150Hz down to ~50Hz
        let pitch = 150.0 * (-t * 25.0).exp() + 50.0;
        let amp = (-t * 10.0).exp();

        let click = if t < 0.005 {
            (2.0 * PI * 2000.0 * t).sin() * (1.0 - t / 0.005)
        } else {
            0.0
        };

        (2.0 * PI * pitch * t).sin() * amp * 0.8 + click * 0.2
    }

    /// Snare drum: noise + tone body
    fn snare(&mut self) -> f32 {
        let t = self.time();

        let body = (2.0 * PI * 200.0 * t).sin();
        let body_env = (-t * 30.0).exp();

        let noise = self.rng.noise();
        let noise_env = (-t * 15.0).exp();

        body * body_env * 0.3 + noise * noise_env * 0.7
    }

    /// Tom: sine with a short downward sweep onto the drum's pitch
    fn tom(&self) -> f32 {
        let t = self.time();
        let base = tom_pitch(self.sound);

        let pitch = base * 0.6 * (-t * 15.0).exp() + base;
        let amp = (-t * 12.0).exp();

        (2.0 * PI * pitch * t).sin() * amp * 0.8
    }

    /// Crash cymbal: high-passed noise with shimmer
    fn crash(&mut self) -> f32 {
        let t = self.time();
        let amp = (-t * 3.0).exp();

        let noise = self.rng.noise();
        let shimmer = (2.0 * PI * 5000.0 * t).sin() * 0.1;

        self.hp_state = 0.9 * (self.hp_state + noise - self.last_noise);
        self.last_noise = noise;

        (self.hp_state + shimmer) * amp * 0.4
    }

    /// Closed hi-hat: short high-passed noise
    fn hihat(&mut self) -> f32 {
        let t = self.time();
        let amp = (-t * 50.0).exp();

        let noise = self.rng.noise();
        self.hp_state = 0.8 * (self.hp_state + noise - self.last_noise);
        self.last_noise = noise;

        self.hp_state * amp * 0.5
    }

    /// Hand clap: three noise bursts 15ms apart
    fn clap(&mut self) -> f32 {
        let t = self.time();
        let mut signal = 0.0;

        for i in 0..3 {
            let offset = i as f32 * 0.015;
            if t >= offset {
                let env = (-(t - offset) * 20.0).exp();
                signal += self.rng.noise() * env * 0.4;
            }
        }

        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_synthesis() {
        let mut osc = DrumOscillator::new(DrumSound::Kick, 44100.0);

        let samples: Vec<f32> = (0..1000).map(|_| osc.next_sample()).collect();

        assert!(samples[10].abs() > 0.0, "sample[10] should be non-zero");

        let max_early: f32 = samples[0..100].iter().map(|s| s.abs()).fold(0.0, f32::max);
        assert!(max_early > 0.1, "should have attack energy");

        let max_late: f32 = samples[900..1000]
            .iter()
            .map(|s| s.abs())
            .fold(0.0, f32::max);
        assert!(max_late < max_early, "should decay over time");
    }

    #[test]
    fn test_drum_finishes() {
        let mut osc = DrumOscillator::new(DrumSound::Snare, 44100.0);
        while !osc.is_finished() {
            osc.next_sample();
        }
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_restart_replays_from_start() {
        let mut osc = DrumOscillator::new(DrumSound::Tom2, 44100.0);
        let first: Vec<f32> = (0..64).map(|_| osc.next_sample()).collect();
        while !osc.is_finished() {
            osc.next_sample();
        }

        osc.restart();
        assert!(!osc.is_finished());
        let again: Vec<f32> = (0..64).map(|_| osc.next_sample()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_toms_are_pitched_apart() {
        assert!(tom_pitch(DrumSound::Tom1) > tom_pitch(DrumSound::Tom2));
        assert!(tom_pitch(DrumSound::Tom2) > tom_pitch(DrumSound::Tom3));
        assert!(tom_pitch(DrumSound::Tom3) > tom_pitch(DrumSound::Tom4));
    }

    #[test]
    fn test_all_drum_sounds() {
        for drum in DrumSound::ALL {
            let mut osc = DrumOscillator::new(drum, 44100.0);
            for _ in 0..256 {
                assert!(osc.next_sample().is_finite());
            }
        }
    }
}
