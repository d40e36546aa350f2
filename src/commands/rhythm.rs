//! Rhythm commands (suggest, teach, replay, stop, hit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use drumkit_core::{Overrides, Pattern, PlaybackMode, VoiceKey};

/// Parse `[length] [density]` arguments
fn parse_overrides(args: &str) -> Result<Overrides, String> {
    let mut parts = args.split_whitespace();
    let mut overrides = Overrides::none();

    if let Some(length) = parts.next() {
        let length = length
            .parse::<usize>()
            .map_err(|_| format!("Invalid length '{}'", length))?;
        overrides = overrides.length(length);
    }
    if let Some(density) = parts.next() {
        match density.parse::<f64>() {
            Ok(p) if (0.0..=1.0).contains(&p) => overrides = overrides.hit_probability(p),
            _ => return Err(format!("Invalid density '{}': use 0.0-1.0", density)),
        }
    }
    if parts.next().is_some() {
        return Err("Too many arguments: expected [length] [density]".to_string());
    }
    Ok(overrides)
}

/// Handle `suggest [length] [density]`
pub fn cmd_suggest(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match parse_overrides(args) {
        Ok(overrides) => {
            ctx.run_session(move |trainer, session| trainer.suggest_in(session, &overrides).1);
            CommandResult::Success
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `teach [length] [density]`
pub fn cmd_teach(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match parse_overrides(args) {
        Ok(overrides) => {
            ctx.run_session(move |trainer, session| trainer.teach_in(session, &overrides).1);
            CommandResult::Success
        }
        Err(e) => CommandResult::Error(e),
    }
}

fn replay(args: &str, ctx: &mut CommandContext, mode: PlaybackMode) -> CommandResult {
    if args.is_empty() {
        let usage = match mode {
            PlaybackMode::Audible => "replay",
            PlaybackMode::Teach => "replay teach",
        };
        return CommandResult::Error(format!("Usage: {} <steps>, e.g. W – K J", usage));
    }
    match Pattern::parse(args) {
        Ok(pattern) => {
            if let Some(key) = pattern
                .iter()
                .filter_map(|s| s.voice())
                .find(|k| !ctx.trainer.kit().contains(*k))
            {
                return CommandResult::Error(format!("No pad bound to '{}'", key));
            }
            ctx.run_session(move |trainer, session| trainer.replay_in(session, mode, &pattern));
            CommandResult::Success
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `replay <steps>`
pub fn cmd_replay(args: &str, ctx: &mut CommandContext) -> CommandResult {
    replay(args, ctx, PlaybackMode::Audible)
}

/// Handle `replay teach <steps>`
pub fn cmd_replay_teach(args: &str, ctx: &mut CommandContext) -> CommandResult {
    replay(args, ctx, PlaybackMode::Teach)
}

/// Handle `stop`
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.trainer.is_running() {
        ctx.trainer.stop();
        CommandResult::Success
    } else {
        ctx.trainer.stop();
        CommandResult::Message("Nothing is playing.".bright_black().to_string())
    }
}

/// Handle `hit <keys>`: strike each pad in turn
pub fn cmd_hit(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: hit <keys>".to_string());
    }
    press_keys(args, ctx)
}

/// Strike every pad named in `input`; unknown characters are reported
pub fn press_keys(input: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut unknown = Vec::new();
    for c in input.chars().filter(|c| !c.is_whitespace()) {
        let pressed = VoiceKey::new(c)
            .map(|key| ctx.trainer.press(key))
            .unwrap_or(false);
        if !pressed {
            unknown.push(c);
        }
    }

    if unknown.is_empty() {
        CommandResult::Success
    } else {
        CommandResult::Error(format!(
            "No pad for: {}",
            unknown.iter().collect::<String>()
        ))
    }
}
