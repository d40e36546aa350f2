//! General REPL commands (help, quit, kit, status) and settings

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use drumkit_core::PlaybackMode;
use std::time::Duration;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.trainer.stop();
    CommandResult::Exit
}

/// Handle `kit`: list pads and their sounds
pub fn cmd_kit(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let lines: Vec<String> = ctx
        .trainer
        .kit()
        .voices()
        .iter()
        .map(|v| format!("  {}  {}", format!("[{}]", v.key).bright_yellow(), v.sound))
        .collect();
    CommandResult::Message(format!("🥁 Kit:\n{}", lines.join("\n")))
}

/// Handle `status`: settings and playback state
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let config = ctx.trainer.config();
    let playing = if ctx.trainer.is_running() {
        "▶ playing".bright_green().to_string()
    } else {
        "idle".bright_black().to_string()
    };
    let sound = match &ctx.board {
        Some(board) if board.has_sound() => "on",
        _ => "off",
    };
    CommandResult::Message(format!(
        "Session: {}\nLength: {} steps\nDensity: {:.2}\nInterval: play {} ms, teach {} ms\nSound: {}",
        playing,
        config.length,
        config.hit_probability,
        config.audible_interval.as_millis(),
        config.teach_interval.as_millis(),
        sound
    ))
}

/// Handle `length [n]`
pub fn cmd_length(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Rhythm length: {} steps",
            ctx.trainer.config().length
        ));
    }

    match args.parse::<usize>() {
        Ok(length) => match ctx.trainer.update_config(|c| c.set_length(length)) {
            Ok(()) => CommandResult::Message(
                format!("📏 Length set to {} steps", length)
                    .bright_green()
                    .to_string(),
            ),
            Err(e) => CommandResult::Error(e.to_string()),
        },
        Err(_) => CommandResult::Error("Invalid length. Use a whole number of steps".to_string()),
    }
}

/// Handle `density [p]`
pub fn cmd_density(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Hit density: {:.2}",
            ctx.trainer.config().hit_probability
        ));
    }

    match args.parse::<f64>() {
        Ok(p) => match ctx.trainer.update_config(|c| c.set_hit_probability(p)) {
            Ok(()) => CommandResult::Message(
                format!("🎲 Density set to {:.2}", p)
                    .bright_green()
                    .to_string(),
            ),
            Err(e) => CommandResult::Error(e.to_string()),
        },
        Err(_) => CommandResult::Error("Invalid density. Use a value between 0.0-1.0".to_string()),
    }
}

/// Handle `interval [play|teach] [ms]`
pub fn cmd_interval(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut parts = args.split_whitespace();
    let mode = match parts.next() {
        None => {
            let config = ctx.trainer.config();
            return CommandResult::Message(format!(
                "Step interval: play {} ms, teach {} ms",
                config.audible_interval.as_millis(),
                config.teach_interval.as_millis()
            ));
        }
        Some("play") => PlaybackMode::Audible,
        Some("teach") => PlaybackMode::Teach,
        Some(other) => {
            return CommandResult::Error(format!(
                "Unknown mode '{}'. Use: interval [play|teach] [ms]",
                other
            ))
        }
    };

    let Some(ms) = parts.next() else {
        return CommandResult::Message(format!(
            "{} interval: {} ms",
            mode,
            ctx.trainer.config().interval(mode).as_millis()
        ));
    };

    match ms.parse::<u64>() {
        Ok(ms) => {
            match ctx
                .trainer
                .update_config(|c| c.set_interval(mode, Duration::from_millis(ms)))
            {
                Ok(()) => CommandResult::Message(
                    format!("⏱  {} interval set to {} ms", mode, ms)
                        .bright_green()
                        .to_string(),
                ),
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }
        Err(_) => CommandResult::Error("Invalid interval. Use milliseconds".to_string()),
    }
}

/// Handle `volume [level]`
pub fn cmd_volume(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message("Volume control: use 'volume <0-100>'".to_string());
    }

    let Some(sampler) = ctx.board.as_ref().and_then(|b| b.sampler()) else {
        return CommandResult::Error("Sound is off".to_string());
    };

    match args.parse::<f32>() {
        Ok(vol) => {
            let normalized_vol = if vol > 1.0 { vol / 100.0 } else { vol };
            if let Err(e) = sampler.set_volume(normalized_vol) {
                CommandResult::Error(e.to_string())
            } else {
                CommandResult::Message(
                    format!("🔊 Volume set to {:.0}%", normalized_vol.clamp(0.0, 1.0) * 100.0)
                        .bright_green()
                        .to_string(),
                )
            }
        }
        Err(_) => CommandResult::Error(
            "Invalid volume value. Use a number between 0-100 or 0.0-1.0".to_string(),
        ),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "🥁 Drumkit Help".bold());
    println!("{}", "===============".bold());
    println!();
    println!("{}", "Pads:".green());
    println!("  {}                 - Strike one pad", "k".cyan());
    println!("  {}              - Strike several pads in turn", "wasd".cyan());
    println!("  {}          - Same, as a command", "hit <keys>".cyan());
    println!("  {}                - List pads and sounds", "kit".cyan());
    println!();
    println!("{}", "Rhythms:".green());
    println!(
        "  {} - Generate a rhythm and play it",
        "suggest [length] [density]".cyan()
    );
    println!(
        "  {}   - Generate a rhythm and light the pads to follow",
        "teach [length] [density]".cyan()
    );
    println!(
        "  {}   - Play a given rhythm",
        "replay W – K J".cyan()
    );
    println!(
        "  {} - Teach a given rhythm",
        "replay teach W – K J".cyan()
    );
    println!("  {}               - Stop the running rhythm", "stop".cyan());
    println!();
    println!("{}", "Settings:".green());
    println!("  {}       - Steps per rhythm", "length [n]".cyan());
    println!("  {}      - Chance of a hit per step (0.0-1.0)", "density [p]".cyan());
    println!(
        "  {} - Time between steps",
        "interval [play|teach] [ms]".cyan()
    );
    println!("  {}   - Set volume (0-100)", "volume <level>".cyan());
    println!("  {}           - Show settings and playback state", "status".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}
