//! Terminal drum board
//!
//! `TerminalBoard` is the presentation the REPL runs against: it triggers the
//! sampler and prints pad rows and status lines. Clearing a held teach cue
//! prints an unlit row. Printing happens on a
//! dedicated thread fed by a channel, so session threads and the prompt never
//! interleave half-written lines.

use crate::audio::SamplerHandle;
use colored::*;
use crossbeam_channel::{unbounded, Sender};
use drumkit_core::presentation::{Highlight, Presentation};
use drumkit_core::types::{Kit, Voice, VoiceKey};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

/// Lines queued for the printer thread
#[derive(Debug, PartialEq)]
enum BoardEvent {
    Line(String),
    Shutdown,
}

pub struct TerminalBoard {
    kit: Kit,
    sampler: Option<SamplerHandle>,
    /// Pad holding a teach highlight, if any
    held: Mutex<Option<VoiceKey>>,
    tx: Sender<BoardEvent>,
    printer: Option<JoinHandle<()>>,
}

impl TerminalBoard {
    /// Board with sound when a sampler is given, silent otherwise
    pub fn new(kit: Kit, sampler: Option<SamplerHandle>) -> Self {
        let (tx, rx) = unbounded();
        let printer = thread::spawn(move || {
            while let Ok(event) = rx.recv() {
                match event {
                    BoardEvent::Line(line) => println!("{}", line),
                    BoardEvent::Shutdown => break,
                }
            }
        });

        Self {
            kit,
            sampler,
            held: Mutex::new(None),
            tx,
            printer: Some(printer),
        }
    }

    /// Board whose lines go to `tx` rather than stdout
    #[cfg(test)]
    fn capturing(kit: Kit, tx: Sender<BoardEvent>) -> Self {
        Self {
            kit,
            sampler: None,
            held: Mutex::new(None),
            tx,
            printer: None,
        }
    }

    pub fn has_sound(&self) -> bool {
        self.sampler.is_some()
    }

    pub fn sampler(&self) -> Option<&SamplerHandle> {
        self.sampler.as_ref()
    }

    /// Pad currently held by teach mode
    pub fn held(&self) -> Option<VoiceKey> {
        *self.held.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, line: String) {
        let _ = self.tx.send(BoardEvent::Line(line));
    }
}

/// Render the row of pads with at most one pad lit
pub fn render_pads(kit: &Kit, lit: Option<(VoiceKey, Highlight)>) -> String {
    kit.voices()
        .iter()
        .map(|voice| {
            let pad = format!("[{}]", voice.key);
            match lit {
                Some((key, Highlight::Pressed)) if key == voice.key => {
                    pad.bright_yellow().bold().to_string()
                }
                Some((key, Highlight::Teach)) if key == voice.key => {
                    pad.black().on_bright_green().bold().to_string()
                }
                _ => pad.bright_black().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Presentation for TerminalBoard {
    fn play_sound(&self, voice: &Voice) {
        if let Some(sampler) = &self.sampler {
            if let Err(e) = sampler.trigger(voice.sound) {
                log::warn!("could not play {}: {}", voice.sound, e);
            }
        }
    }

    fn highlight(&self, key: VoiceKey, style: Highlight) {
        if !self.kit.contains(key) {
            return;
        }
        if style == Highlight::Teach {
            *self.held.lock().unwrap_or_else(|e| e.into_inner()) = Some(key);
        }
        self.emit(render_pads(&self.kit, Some((key, style))));
    }

    fn unhighlight_all(&self) {
        let cleared = self.held.lock().unwrap_or_else(|e| e.into_inner()).take();
        if cleared.is_some() {
            self.emit(render_pads(&self.kit, None));
        }
    }

    fn set_status(&self, text: &str) {
        self.emit(format!("{} {}", "▸".bright_black(), text.bright_white()));
    }

    fn set_suggestion_text(&self, text: &str) {
        self.emit(format!("{} {}", "♫".bright_magenta(), text.bright_cyan()));
    }
}

impl Drop for TerminalBoard {
    fn drop(&mut self) {
        let _ = self.tx.send(BoardEvent::Shutdown);
        if let Some(printer) = self.printer.take() {
            let _ = printer.join();
        }
    }
}
