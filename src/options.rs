//! Command-line options

use anyhow::Result;
use clap::Parser;
use drumkit_core::Kit;

#[derive(Parser, Clone, Debug, Default, PartialEq)]
#[command(name = "drumkit")]
#[command(about = "Terminal drum board with rhythm suggestion and teach modes")]
#[command(
    after_help = "Sounds: kick snare tom1 tom2 tom3 tom4 crash hihat clap\nLog level via RUST_LOG."
)]
pub struct Options {
    /// Kit specification such as "w=tom1 j=snare k=kick"
    #[arg(long, env = "DRUMKIT_KIT", value_name = "KEY=SOUND ...")]
    pub kit: Option<String>,

    /// Skip opening the audio device
    #[arg(long)]
    pub silent: bool,
}

impl Options {
    /// Build the kit from `--kit` (or `DRUMKIT_KIT`), else the standard layout
    pub fn kit(&self) -> Result<Kit> {
        match &self.kit {
            Some(spec) => Kit::parse(spec),
            None => Ok(Kit::standard()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use drumkit_core::DrumSound;

    #[test]
    fn test_command_definition() {
        Options::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let options = Options::try_parse_from(["drumkit", "--silent", "--kit", "q=clap"]).unwrap();
        assert!(options.silent);
        assert_eq!(options.kit.as_deref(), Some("q=clap"));
        assert_eq!(options.kit().unwrap().voices()[0].sound, DrumSound::Clap);
    }

    #[test]
    fn test_errors() {
        assert!(Options::try_parse_from(["drumkit", "--kit"]).is_err());
        assert!(Options::try_parse_from(["drumkit", "--loud"]).is_err());
        let help = Options::try_parse_from(["drumkit", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_kit_from_spec() {
        assert_eq!(Options::default().kit().unwrap(), Kit::standard());

        let options = Options {
            kit: Some("z=kick".to_string()),
            silent: false,
        };
        assert_eq!(options.kit().unwrap().voices()[0].sound, DrumSound::Kick);

        let options = Options {
            kit: Some("z=gong".to_string()),
            silent: false,
        };
        assert!(options.kit().is_err());
    }

    #[test]
    fn test_kit_env_is_declared() {
        let command = Options::command();
        let kit = command
            .get_arguments()
            .find(|arg| arg.get_id() == "kit")
            .unwrap();
        assert_eq!(kit.get_env(), Some(std::ffi::OsStr::new("DRUMKIT_KIT")));
    }
}
