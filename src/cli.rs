//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "droidpin",
    version,
    about = "Pin Android apps to the desktop as scrcpy shortcuts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List third-party packages on the connected device
    List,
    /// Create a desktop shortcut for a package
    Shortcut(ShortcutArgs),
    /// Generate icons for every listed package, one at a time
    Icons,
}

#[derive(Args)]
pub struct ShortcutArgs {
    /// Package id; picked interactively when omitted
    pub package: Option<String>,

    /// Forward device audio playback through the mirror window
    #[arg(long, conflicts_with = "no_audio")]
    pub audio: bool,

    /// Launch the mirror window without audio
    #[arg(long)]
    pub no_audio: bool,
}

impl ShortcutArgs {
    /// Audio choice from flags; `None` means "ask or use the default"
    pub fn audio_choice(&self) -> Option<bool> {
        match (self.audio, self.no_audio) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_audio_choice() {
        let args = ShortcutArgs {
            package: None,
            audio: true,
            no_audio: false,
        };
        assert_eq!(args.audio_choice(), Some(true));

        let args = ShortcutArgs {
            package: None,
            audio: false,
            no_audio: true,
        };
        assert_eq!(args.audio_choice(), Some(false));

        let args = ShortcutArgs {
            package: None,
            audio: false,
            no_audio: false,
        };
        assert_eq!(args.audio_choice(), None);
    }
}
