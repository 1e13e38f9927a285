//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::audio::Duration;

/// QR Audio - link audio recordings to scannable QR codes
#[derive(Parser, Debug)]
#[command(name = "qr-audio")]
#[command(version = "0.1.0")]
#[command(about = "Record audio messages, print them as QR codes, and play them back by scanning")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record or import audio and generate its QR code
    Create {
        /// Import an audio file instead of recording
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Recording duration (e.g., 10s, 1m, 2m30s)
        #[arg(short, long, value_name = "TIME", conflicts_with = "file")]
        duration: Option<String>,

        /// Where to write the QR code PNG
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Replace the audio of an existing message; its QR code stays valid
    Update {
        /// Id of the message to update
        id: String,

        /// Import an audio file instead of recording
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Recording duration (e.g., 10s, 1m, 2m30s)
        #[arg(short, long, value_name = "TIME", conflicts_with = "file")]
        duration: Option<String>,

        /// Keep the current title/description/emoji instead of re-analyzing
        #[arg(long)]
        keep_meta: bool,
    },
    /// Scan a QR code with the camera and play the matching message
    Scan {
        /// Camera device index
        #[arg(short, long, value_name = "INDEX")]
        camera: Option<u32>,
    },
    /// List stored messages, newest first
    List,
    /// Play a stored message by id
    Play {
        /// Id of the message to play
        id: String,
    },
    /// Write the QR code PNG for an existing message
    Export {
        /// Id of the message to export
        id: String,

        /// Where to write the QR code PNG
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Delete a stored message
    Delete {
        /// Id of the message to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed create options
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub file: Option<PathBuf>,
    pub duration: Duration,
    pub out: Option<PathBuf>,
    pub qr_dir: Option<PathBuf>,
}

/// Parsed update options
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub id: String,
    pub file: Option<PathBuf>,
    pub duration: Duration,
    pub keep_meta: bool,
}

/// Parsed scan options
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub camera: u32,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["api_key", "duration", "camera", "qr_dir"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::Parser;

    #[test]
    fn cli_parses_create_defaults() {
        let cli = Cli::parse_from(["qr-audio", "create"]);
        match cli.command {
            Commands::Create { file, duration, out } => {
                assert!(file.is_none());
                assert!(duration.is_none());
                assert!(out.is_none());
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn cli_parses_create_with_file_and_out() {
        let cli = Cli::parse_from(["qr-audio", "create", "-f", "clip.wav", "-o", "code.png"]);
        match cli.command {
            Commands::Create { file, out, .. } => {
                assert_eq!(file, Some(PathBuf::from("clip.wav")));
                assert_eq!(out, Some(PathBuf::from("code.png")));
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn create_file_conflicts_with_duration() {
        let result = Cli::try_parse_from(["qr-audio", "create", "-f", "clip.wav", "-d", "30s"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_update_with_keep_meta() {
        let cli = Cli::parse_from(["qr-audio", "update", "abc1234", "--keep-meta"]);
        match cli.command {
            Commands::Update { id, keep_meta, .. } => {
                assert_eq!(id, "abc1234");
                assert!(keep_meta);
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn cli_parses_scan_with_camera() {
        let cli = Cli::parse_from(["qr-audio", "scan", "-c", "1"]);
        match cli.command {
            Commands::Scan { camera } => assert_eq!(camera, Some(1)),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn cli_parses_delete_with_yes() {
        let cli = Cli::parse_from(["qr-audio", "delete", "abc1234", "-y"]);
        match cli.command {
            Commands::Delete { id, yes } => {
                assert_eq!(id, "abc1234");
                assert!(yes);
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["qr-audio", "config", "set", "camera", "1"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "camera");
            assert_eq!(value, "1");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("api_key"));
        assert!(is_valid_config_key("duration"));
        assert!(is_valid_config_key("camera"));
        assert!(is_valid_config_key("qr_dir"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
