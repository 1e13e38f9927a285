//! Command runners wiring adapters into use cases

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{
    Annotator, AudioPlayer, AudioRecorder, ConfigStore, ProgressCallback, RecordingError,
};
use crate::application::{
    CreateMessageInput, CreateMessageUseCase, MessageLibrary, ScanOutcome, ScanQrUseCase,
};
use crate::domain::audio::{AudioData, AudioMimeType, Duration};
use crate::domain::config::AppConfig;
use crate::domain::message::AudioMessage;
use crate::infrastructure::{
    CpalRecorder, GeminiAnnotator, JsonFileStore, NokhwaFrameSource, NoopAnnotator, QrPngExporter,
    RodioPlayer, RqrrDecoder, XdgConfigStore,
};

use super::args::{CreateOptions, ScanOptions, UpdateOptions};
use super::presenter::{format_recording_progress, Presenter};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Record or import audio, annotate it, store it, and export its QR code
pub async fn run_create(options: CreateOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let mut library = open_library().await;

    let audio = match acquire_audio(options.file.as_deref(), options.duration, &mut presenter).await
    {
        Ok(audio) => audio,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (message, analyzed) = build_message(
        CreateMessageInput {
            audio,
            existing: None,
            keep_annotation: false,
        },
        &mut presenter,
    )
    .await;

    if let Err(e) = library.upsert(message.clone()).await {
        presenter.error(&format!("Failed to save message: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let qr_path = resolve_qr_path(options.out, options.qr_dir, &message.title);
    if let Err(e) = QrPngExporter::new().export(&message.id, &qr_path) {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    if analyzed {
        presenter.success(&format!("{} {}", message.display_emoji(), message.title));
        if let Some(description) = message.description.as_deref() {
            presenter.info(description);
        }
    } else {
        presenter.success(&message.title);
    }
    presenter.success(&format!("QR code saved to {}", qr_path.display()));
    presenter.output(message.id.as_str());

    ExitCode::from(EXIT_SUCCESS)
}

/// Replace the audio of an existing message, keeping its id and QR code
pub async fn run_update(options: UpdateOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let mut library = open_library().await;

    let Some(existing) = library.resolve(&options.id).cloned() else {
        presenter.error(&format!("No message with id \"{}\"", options.id));
        return ExitCode::from(EXIT_ERROR);
    };

    let audio = match acquire_audio(options.file.as_deref(), options.duration, &mut presenter).await
    {
        Ok(audio) => audio,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let title = existing.title.clone();
    let (message, _) = build_message(
        CreateMessageInput {
            audio,
            existing: Some(existing),
            keep_annotation: options.keep_meta,
        },
        &mut presenter,
    )
    .await;

    if let Err(e) = library.upsert(message.clone()).await {
        presenter.error(&format!("Failed to save message: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.success(&format!(
        "Audio updated for \"{}\"; the QR code stays the same",
        title
    ));
    presenter.output(message.id.as_str());

    ExitCode::from(EXIT_SUCCESS)
}

/// Scan a QR code with the camera and play the matching message
pub async fn run_scan(options: ScanOptions) -> ExitCode {
    let presenter = Presenter::new();
    let library = open_library().await;

    let frames = NokhwaFrameSource::new(options.camera);
    let use_case = ScanQrUseCase::new(frames, RqrrDecoder::new());

    // Ctrl+C ends the scan session cleanly
    let shutdown = ShutdownSignal::with_flag(use_case.stop_flag());
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.info("Point the camera at a QR code to play its audio. Ctrl+C to stop.");

    match use_case.execute(None).await {
        Ok(ScanOutcome::Matched(id)) => match library.resolve(&id) {
            Some(message) => play_message(message, &presenter).await,
            None => {
                // Expected when scanning a code from another device
                presenter.info(
                    "Message not found! This QR code might belong to a different device or has been deleted.",
                );
                ExitCode::from(EXIT_SUCCESS)
            }
        },
        Ok(ScanOutcome::Cancelled) => {
            presenter.info("Scan cancelled");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            presenter.info("Re-run 'qr-audio scan' to try again.");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// List stored messages, newest first
pub async fn run_list() -> ExitCode {
    let presenter = Presenter::new();
    let library = open_library().await;

    if library.is_empty() {
        presenter.info("No messages yet. Create one with 'qr-audio create'.");
        return ExitCode::from(EXIT_SUCCESS);
    }

    for message in library.messages() {
        let size = crate::domain::audio::human_readable_size(message.audio_size_bytes());
        presenter.output(&format!(
            "{} {}  [{}]  {}  {}",
            message.display_emoji(),
            message.title,
            message.id,
            format_timestamp(message.created_at),
            size
        ));
        if let Some(description) = message.description.as_deref() {
            if !description.is_empty() {
                presenter.output(&format!("   {}", description));
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Play a stored message by id
pub async fn run_play(id: String) -> ExitCode {
    let presenter = Presenter::new();
    let library = open_library().await;

    match library.resolve(&id) {
        Some(message) => play_message(message, &presenter).await,
        None => {
            presenter.error(&format!("No message with id \"{}\"", id));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Re-export the QR code PNG for an existing message
pub async fn run_export(id: String, out: Option<PathBuf>, qr_dir: Option<PathBuf>) -> ExitCode {
    let presenter = Presenter::new();
    let library = open_library().await;

    let Some(message) = library.resolve(&id) else {
        presenter.error(&format!("No message with id \"{}\"", id));
        return ExitCode::from(EXIT_ERROR);
    };

    let qr_path = resolve_qr_path(out, qr_dir, &message.title);
    match QrPngExporter::new().export(&message.id, &qr_path) {
        Ok(()) => {
            presenter.success(&format!("QR code saved to {}", qr_path.display()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Delete a stored message, asking for confirmation first
pub async fn run_delete(id: String, yes: bool) -> ExitCode {
    let presenter = Presenter::new();
    let mut library = open_library().await;

    let Some(message) = library.resolve(&id) else {
        presenter.info(&format!("No message with id \"{}\"; nothing to delete", id));
        return ExitCode::from(EXIT_SUCCESS);
    };

    if !yes {
        let question = format!("Delete \"{}\"? Its printed QR codes will stop working.", message.title);
        if !presenter.confirm(&question) {
            presenter.info("Not deleted");
            return ExitCode::from(EXIT_SUCCESS);
        }
    }

    match library.delete(&id).await {
        Ok(_) => {
            presenter.success("Message deleted");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&format!("Failed to delete message: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Hydrate the message library from its default store
async fn open_library() -> MessageLibrary<JsonFileStore> {
    MessageLibrary::hydrate(JsonFileStore::new()).await
}

/// Record from the microphone or read an audio file
async fn acquire_audio(
    file: Option<&Path>,
    duration: Duration,
    presenter: &mut Presenter,
) -> Result<AudioData, String> {
    match file {
        Some(path) => load_audio_file(path).await,
        None => record_audio(duration, presenter)
            .await
            .map_err(|e| e.to_string()),
    }
}

/// Read an audio file into AudioData, inferring its MIME type
async fn load_audio_file(path: &Path) -> Result<AudioData, String> {
    let mime_type = AudioMimeType::from_path(path)
        .ok_or_else(|| format!("Unsupported audio file type: {}", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    if bytes.is_empty() {
        return Err(format!("{} is empty", path.display()));
    }

    Ok(AudioData::new(bytes, mime_type))
}

/// Record from the microphone with a progress spinner
async fn record_audio(
    duration: Duration,
    presenter: &mut Presenter,
) -> Result<AudioData, RecordingError> {
    presenter.start_spinner(&format!("Recording for {}...", duration));

    let on_progress: Option<ProgressCallback> = presenter.spinner_handle().map(|bar| {
        Arc::new(move |elapsed: u64, total: u64| {
            bar.set_message(format!(
                "Recording... {}",
                format_recording_progress(elapsed, total)
            ));
        }) as ProgressCallback
    });

    let recorder = CpalRecorder::new();
    let result = recorder.record(duration, on_progress).await;

    match &result {
        Ok(audio) => presenter.spinner_success(&format!(
            "Recording complete ({})",
            audio.human_readable_size()
        )),
        Err(_) => presenter.spinner_fail("Recording failed"),
    }

    result
}

/// Annotate the audio and build the message, using the fixed fallback when
/// no API key is configured or the service fails
async fn build_message(
    input: CreateMessageInput,
    presenter: &mut Presenter,
) -> (AudioMessage, bool) {
    let needs_analysis = !(input.keep_annotation && input.existing.is_some());
    if needs_analysis {
        presenter.start_spinner("Analyzing audio...");
    }

    let result = match get_api_key().await {
        Some(api_key) => {
            run_create_use_case(GeminiAnnotator::new(api_key), input).await
        }
        None => run_create_use_case(NoopAnnotator::new(), input).await,
    };

    if needs_analysis {
        if result.1 {
            presenter.spinner_success("Analysis complete");
        } else {
            presenter.spinner_fail("Analysis unavailable, using fallback");
        }
    }

    result
}

async fn run_create_use_case<A: Annotator>(
    annotator: A,
    input: CreateMessageInput,
) -> (AudioMessage, bool) {
    CreateMessageUseCase::new(annotator).execute(input).await
}

/// Resolve and play a message, surfacing playback problems
async fn play_message(message: &AudioMessage, presenter: &Presenter) -> ExitCode {
    presenter.success(&format!("{} {}", message.display_emoji(), message.title));
    if let Some(description) = message.description.as_deref() {
        if !description.is_empty() {
            presenter.info(description);
        }
    }

    let audio = match message.audio() {
        Ok(audio) => audio,
        Err(e) => {
            presenter.error(&format!("Stored audio is corrupt: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match RodioPlayer::new().play(&audio).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Choose where to write a QR code PNG
fn resolve_qr_path(out: Option<PathBuf>, qr_dir: Option<PathBuf>, title: &str) -> PathBuf {
    match out {
        Some(path) => path,
        None => {
            let dir = qr_dir.unwrap_or_else(|| PathBuf::from("."));
            dir.join(QrPngExporter::default_file_name(title))
        }
    }
}

/// Format an epoch-milliseconds timestamp for display
fn format_timestamp(millis: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Option<String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    config.api_key.filter(|k| !k.is_empty())
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_qr_path_prefers_explicit_out() {
        let path = resolve_qr_path(
            Some(PathBuf::from("/tmp/code.png")),
            Some(PathBuf::from("/ignored")),
            "Title",
        );
        assert_eq!(path, PathBuf::from("/tmp/code.png"));
    }

    #[test]
    fn resolve_qr_path_uses_qr_dir_and_title() {
        let path = resolve_qr_path(None, Some(PathBuf::from("/qr")), "My Note");
        assert_eq!(path, PathBuf::from("/qr/QR-My-Note.png"));
    }

    #[test]
    fn resolve_qr_path_defaults_to_cwd() {
        let path = resolve_qr_path(None, None, "My Note");
        assert_eq!(path, PathBuf::from("./QR-My-Note.png"));
    }

    #[test]
    fn format_timestamp_renders_utc_date() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_timestamp(1700000000000), "2023-11-14 22:13");
    }
}
