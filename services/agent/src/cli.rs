use clap::{Parser, Subcommand};
use parley_core::persona::Persona;
use std::path::PathBuf;

/// Serve a Parley voice-agent persona as an MCP tool server on stdio.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub persona: PersonaCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaCommand {
    /// Sales development rep: FAQ answers and lead capture.
    Sdr,
    /// Game Master for the lighthouse adventure.
    Adventure,
}

impl From<PersonaCommand> for Persona {
    fn from(cmd: PersonaCommand) -> Self {
        match cmd {
            PersonaCommand::Sdr => Persona::Sdr,
            PersonaCommand::Adventure => Persona::Adventure,
        }
    }
}

/// Write the built-in adventure world as editable JSON for `WORLD_PATH`.
#[derive(Parser, Debug)]
#[command(name = "parley-world-export", version, about)]
pub struct ExportCli {
    /// Where to write the world file.
    #[arg(default_value = "world.json")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_personas() {
        let cli = Cli::try_parse_from(["parley-agent", "sdr"]).unwrap();
        assert_eq!(Persona::from(cli.persona), Persona::Sdr);

        let cli = Cli::try_parse_from(["parley-agent", "adventure"]).unwrap();
        assert_eq!(Persona::from(cli.persona), Persona::Adventure);
    }

    #[test]
    fn test_persona_is_required() {
        assert!(Cli::try_parse_from(["parley-agent"]).is_err());
        assert!(Cli::try_parse_from(["parley-agent", "poet"]).is_err());
    }

    #[test]
    fn test_export_path_defaults_to_world_json() {
        let cli = ExportCli::try_parse_from(["parley-world-export"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("world.json"));

        let cli =
            ExportCli::try_parse_from(["parley-world-export", "out/lighthouse.json"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("out/lighthouse.json"));
    }

    #[test]
    fn test_export_help_is_not_a_path() {
        let err = ExportCli::try_parse_from(["parley-world-export", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        assert!(ExportCli::try_parse_from(["parley-world-export", "--force"]).is_err());
    }
}
