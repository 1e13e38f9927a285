//! QR Audio CLI entry point

use std::process::ExitCode;

use clap::Parser;

use qr_audio::cli::{
    app::{load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    CreateOptions, ScanOptions, UpdateOptions,
};
use qr_audio::domain::audio::Duration;
use qr_audio::domain::config::AppConfig;
use qr_audio::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Create { file, duration, out } => {
            let cli_config = AppConfig {
                duration: duration.clone(),
                ..Default::default()
            };
            let config = load_merged_config(cli_config).await;

            let duration = match parse_duration(&config, &presenter) {
                Ok(d) => d,
                Err(code) => return code,
            };

            let options = CreateOptions {
                file,
                duration,
                out,
                qr_dir: config.qr_dir.as_ref().map(Into::into),
            };
            qr_audio::cli::run_create(options).await
        }

        Commands::Update {
            id,
            file,
            duration,
            keep_meta,
        } => {
            let cli_config = AppConfig {
                duration: duration.clone(),
                ..Default::default()
            };
            let config = load_merged_config(cli_config).await;

            let duration = match parse_duration(&config, &presenter) {
                Ok(d) => d,
                Err(code) => return code,
            };

            let options = UpdateOptions {
                id,
                file,
                duration,
                keep_meta,
            };
            qr_audio::cli::run_update(options).await
        }

        Commands::Scan { camera } => {
            let cli_config = AppConfig {
                camera,
                ..Default::default()
            };
            let config = load_merged_config(cli_config).await;

            let options = ScanOptions {
                camera: config.camera_or_default(),
            };
            qr_audio::cli::run_scan(options).await
        }

        Commands::List => qr_audio::cli::run_list().await,

        Commands::Play { id } => qr_audio::cli::run_play(id).await,

        Commands::Export { id, out } => {
            let config = load_merged_config(AppConfig::empty()).await;
            qr_audio::cli::run_export(id, out, config.qr_dir.as_ref().map(Into::into)).await
        }

        Commands::Delete { id, yes } => qr_audio::cli::run_delete(id, yes).await,
    }
}

/// Parse the merged duration setting, reporting bad values as usage errors
fn parse_duration(config: &AppConfig, presenter: &Presenter) -> Result<Duration, ExitCode> {
    match config.duration.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => Ok(d),
            Err(e) => {
                presenter.error(&format!("Invalid duration: {}", e));
                Err(ExitCode::from(EXIT_USAGE_ERROR))
            }
        },
        None => Ok(Duration::default_duration()),
    }
}
