// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::file_utils::{remove_file_extension, FileManager};
use crate::media::{EmbedMode, MediaAsset, MediaKind};
use crate::services::ProjectsClient;
use crate::session::{CaptionsDocument, Debouncer, EditCommand, EditingSession, FileSink, ProjectSink, TimelineSink};

mod app_config;
mod app_controller;
mod errors;
mod exporter;
mod file_utils;
mod media;
mod providers;
mod services;
mod session;
mod timeline;
mod validation;

/// CLI wrapper for the embed mode, including the no-video option
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum CliEmbedMode {
    /// Mux a selectable mov_text subtitle stream (fast, lossless)
    Soft,
    /// Burn the subtitles into the pixels (re-encodes video)
    Hard,
    /// Subtitle file only, no video export
    None,
}

impl CliEmbedMode {
    fn to_embed_mode(self) -> Option<EmbedMode> {
        match self {
            Self::Soft => Some(EmbedMode::SoftStream),
            Self::Hard => Some(EmbedMode::HardBurn),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for CliEmbedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Hard => write!(f, "hard"),
            Self::None => write!(f, "none"),
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full caption pipeline on a video file (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Apply timestamp edits to an existing captions file
    Edit(EditArgs),

    /// Re-export subtitles or a captioned video from a captions file
    Export(ExportArgs),

    /// Generate shell completions for autocap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input video file to caption
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Also export a captioned video with this embed mode
    #[arg(short, long, value_enum, default_value_t = CliEmbedMode::None)]
    embed: CliEmbedMode,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Captions file produced by the generate command
    #[arg(value_name = "CAPTIONS_PATH")]
    captions_path: PathBuf,

    /// Edits to apply, each of the form INDEX:start|end=SECONDS
    #[arg(long = "set", value_name = "EDIT", required = true)]
    sets: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Source video file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Captions file; defaults to <video stem>.captions.json
    #[arg(long)]
    captions: Option<PathBuf>,

    /// Embed mode for the video export
    #[arg(short, long, value_enum)]
    embed: Option<CliEmbedMode>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autocap - AI-powered video caption generator
///
/// Extracts audio from a short video, transcribes it with an external
/// speech-recognition service, repairs the timestamps into a clean caption
/// timeline, and exports SRT subtitles or a captioned video.
#[derive(Parser, Debug)]
#[command(name = "autocap")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered video caption generator")]
#[command(long_about = "autocap generates timestamped captions for short videos using an
external speech-recognition service, lets you nudge individual caption
boundaries, and exports SRT files or captioned videos.

EXAMPLES:
    autocap clip.mp4                        # Generate captions and clip.srt
    autocap -e soft clip.mp4                # Also export captioned_clip.mp4
    autocap edit clip.captions.json --set 1:start=2.5
    autocap export clip.mp4 --embed hard    # Burn captions into the pixels
    autocap completions bash > autocap.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file
    doesn't exist, a default one will be created automatically. The
    transcription API key can also come from the HF_API_KEY environment
    variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file to caption
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Also export a captioned video with this embed mode
    #[arg(short, long, value_enum, default_value_t = CliEmbedMode::None)]
    embed: CliEmbedMode,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\u{274c} ",
            Level::Warn => "\u{1f6a7} ",
            Level::Info => " ",
            Level::Debug => "\u{1f50d} ",
            Level::Trace => "\u{1f4cb} ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autocap", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Edit(args)) => run_edit(args).await,
        Some(Commands::Export(args)) => run_export(args).await,
        None => {
            // Default behavior: top-level args behave like generate
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            run_generate(GenerateArgs {
                input_path,
                embed: cli.embed,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

/// Load config and reconcile the effective log level
fn load_config(config_path: &str, cmd_log_level: Option<CliLogLevel>) -> Result<Config> {
    if let Some(level) = cmd_log_level {
        log::set_max_level(level.into());
        let config = Config::from_file(config_path)?;
        Ok(config)
    } else {
        let config = Config::from_file(config_path)?;
        log::set_max_level(config.log_level.to_level_filter());
        Ok(config)
    }
}

/// Output path next to the input file
fn sibling_path(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Refuse to clobber an existing output unless forced
fn check_overwrite(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Output already exists (use -f to force overwrite): {:?}",
            path
        ));
    }
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;

    let stem = remove_file_extension(
        &args
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Input path has no file name: {:?}", args.input_path))?,
    );
    let captions_path = sibling_path(&args.input_path, &format!("{}.captions.json", stem));
    let srt_path = sibling_path(&args.input_path, &format!("{}.srt", stem));
    check_overwrite(&captions_path, args.force_overwrite)?;
    check_overwrite(&srt_path, args.force_overwrite)?;

    let controller = Controller::with_config(config)?;
    let outcome = controller.run(&args.input_path).await?;

    let document = CaptionsDocument::new(
        outcome.timeline,
        outcome.video_duration,
        outcome.project_id,
    );
    document.save(&captions_path)?;
    exporter::write_srt_file(&document.timeline, &srt_path)?;

    info!(
        "Generated {} caption(s) in {:.2}s",
        document.timeline.len(),
        outcome.processing_time_secs
    );

    if let Some(mode) = args.embed.to_embed_mode() {
        write_captioned_video(
            &controller,
            &args.input_path,
            &document,
            mode,
            args.force_overwrite,
        )
        .await?;
    }

    Ok(())
}

async fn run_edit(args: EditArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;

    let document = CaptionsDocument::load(&args.captions_path)?;

    let commands: Vec<EditCommand> = args
        .sets
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_>>()?;

    // Persist to the backend project when one exists, otherwise only to
    // the local captions file
    let sink: Arc<dyn TimelineSink> = match (&document.project_id, config.backend.enabled()) {
        (Some(project_id), true) => {
            let client = Arc::new(ProjectsClient::new(
                config.backend.projects_endpoint(),
                config.backend.timeout_secs,
            ));
            Arc::new(ProjectSink::new(client, project_id, &args.captions_path))
        }
        _ => Arc::new(FileSink::new(&args.captions_path)),
    };

    let mut session = EditingSession::new(document, Debouncer::new(sink));

    for command in commands {
        session
            .apply(command)
            .map_err(|e| anyhow!("Edit {}:{}={} rejected: {}", command.index, command.boundary, command.value, e))?;
    }

    // Rapid edits above coalesced; push the final state out now
    session.flush().await?;

    info!("Applied {} edit(s)", args.sets.len());
    Ok(())
}

async fn run_export(args: ExportArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;

    let stem = remove_file_extension(
        &args
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Input path has no file name: {:?}", args.input_path))?,
    );
    let captions_path = args
        .captions
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input_path, &format!("{}.captions.json", stem)));

    // Always read the captions file fresh so the export reflects the
    // current, possibly edited timeline state
    let document = CaptionsDocument::load(&captions_path)?;

    let srt_path = sibling_path(&args.input_path, &format!("{}.srt", stem));
    check_overwrite(&srt_path, args.force_overwrite)?;
    exporter::write_srt_file(&document.timeline, &srt_path)?;

    let mode = match args.embed {
        Some(cli_mode) => cli_mode.to_embed_mode(),
        None => Some(config.export.embed_mode.parse::<EmbedMode>()?),
    };

    if let Some(mode) = mode {
        let controller = Controller::with_config(config)?;
        write_captioned_video(
            &controller,
            &args.input_path,
            &document,
            mode,
            args.force_overwrite,
        )
        .await?;
    }

    Ok(())
}

/// Render the current timeline into the video and write it next to the input
async fn write_captioned_video(
    controller: &Controller,
    input_path: &Path,
    document: &CaptionsDocument,
    mode: EmbedMode,
    force_overwrite: bool,
) -> Result<()> {
    let file_name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Input path has no file name: {:?}", input_path))?;

    let output_path = sibling_path(input_path, &format!("captioned_{}", file_name));
    check_overwrite(&output_path, force_overwrite)?;

    if document.timeline.is_empty() {
        warn!("Timeline is empty; the exported video will have an empty subtitle track");
    }

    let video = MediaAsset::new(
        FileManager::read_bytes(input_path)?,
        MediaKind::Video,
        file_name,
    );

    let captioned = exporter::export_video(
        controller.transcoder(),
        &video,
        &document.timeline,
        mode,
    )
    .await
    .map_err(|e| {
        error!("Video export failed: {}", e);
        anyhow::Error::new(e)
    })?;

    FileManager::write_bytes(&output_path, &captioned.data)?;
    info!("Exported {:?} ({} mode)", output_path, mode);
    Ok(())
}
