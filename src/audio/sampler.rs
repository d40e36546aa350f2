//! One-shot drum playback on the default output device
//!
//! The cpal stream lives on its own thread (streams are not `Send` on every
//! platform); `SamplerHandle` talks to it through shared mix state.

use crate::audio::drum_synth::DrumOscillator;
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::{bounded, Sender};
use drumkit_core::types::DrumSound;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Voices currently sounding. Shared between the handle and the audio callback.
pub struct MixState {
    sample_rate: f32,
    voices: Vec<DrumOscillator>,
    volume: f32,
}

impl MixState {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            voices: Vec::new(),
            volume: 0.8,
        }
    }

    /// Start a sound from its first sample. A sound already ringing is
    /// rewound rather than doubled.
    pub fn trigger(&mut self, sound: DrumSound) {
        match self.voices.iter_mut().find(|v| v.sound() == sound) {
            Some(voice) => voice.restart(),
            None => self
                .voices
                .push(DrumOscillator::new(sound, self.sample_rate)),
        }
    }

    /// Next mono sample, dropping voices that have finished
    pub fn next_value(&mut self) -> f32 {
        let mut sum = 0.0;
        for voice in self.voices.iter_mut() {
            sum += voice.next_sample();
        }
        self.voices.retain(|v| !v.is_finished());
        (sum * self.volume).clamp(-1.0, 1.0)
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

/// Owns the output stream. Lives on the sampler thread.
struct Sampler {
    stream: Stream,
}

impl Sampler {
    fn open(state: Arc<Mutex<MixState>>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device.default_output_config()?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();

        {
            let mut mix = state
                .lock()
                .map_err(|e| anyhow!("Failed to lock mix state: {}", e))?;
            *mix = MixState::new(config.sample_rate.0 as f32);
        }

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, state)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, state)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, state)?,
            _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
        };
        stream
            .play()
            .map_err(|e| anyhow!("Failed to play stream: {}", e))?;

        Ok(Sampler { stream })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        state: Arc<Mutex<MixState>>,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
    {
        let channels = config.channels as usize;
        let err_fn = |err| log::warn!("output stream error: {:?}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut mix) = state.lock() else {
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        let value: T = cpal::Sample::from_sample(mix.next_value());
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

        Ok(stream)
    }
}

/// Thread-safe handle to the drum sampler
pub struct SamplerHandle {
    state: Arc<Mutex<MixState>>,
    shutdown_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// Open the default output device. Fails when no device is available.
    pub fn new() -> Result<Self> {
        let state = Arc::new(Mutex::new(MixState::new(44100.0)));
        let (ready_tx, ready_rx) = bounded::<Result<()>>(1);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let thread_state = state.clone();
        let thread = thread::spawn(move || match Sampler::open(thread_state) {
            Ok(sampler) => {
                let _ = ready_tx.send(Ok(()));
                // Keep the stream alive until the handle goes away
                let _ = shutdown_rx.recv();
                let _ = sampler.stream.pause();
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
            }
        });

        ready_rx
            .recv()
            .map_err(|e| anyhow!("Sampler thread exited during setup: {}", e))??;

        Ok(Self {
            state,
            shutdown_tx,
            thread: Some(thread),
        })
    }

    pub fn trigger(&self, sound: DrumSound) -> Result<()> {
        self.state
            .lock()
            .map_err(|e| anyhow!("Failed to lock mix state: {}", e))?
            .trigger(sound);
        Ok(())
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.state
            .lock()
            .map_err(|e| anyhow!("Failed to lock mix state: {}", e))?
            .set_volume(volume);
        Ok(())
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
