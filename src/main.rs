use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use cadenza::adapters::{DriveClient, FfmpegTranscoder};
use cadenza::application::{resolve_folder, Organizer, PipelineService, WatchService};
use cadenza::config::{self, Config};
use cadenza::domain::metadata::SessionMetadata;

const ENV_HELP: &str = "Environment variables:
  CADENZA_WATCH_FOLDER       Folder to watch for new exports (default: ./watched)
  CADENZA_DRIVE_FOLDER_ID    Google Drive folder ID (takes precedence if set)
  CADENZA_DRIVE_FOLDER_NAME  Google Drive folder name (used if ID is not set; created if missing)
  CADENZA_FFMPEG_PATH        Path to the ffmpeg binary (default: ffmpeg)
  CADENZA_CREDENTIALS        Path to the Google API credentials JSON file (required)

The OAuth token is cached automatically in ./token.json.";

/// Upload session recordings from a watched folder to Google Drive.
#[derive(Debug, Parser)]
#[command(name = "cadenza", version, after_help = ENV_HELP)]
struct Cli {
    /// Folder to scan or watch (overrides CADENZA_WATCH_FOLDER)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Keep running and process files as they appear, instead of a one-shot
    /// scan
    #[arg(short, long)]
    watch: bool,
}

fn print_config(config: &Config) {
    println!("Current Cadenza configuration:");
    println!("  {:<28} {} (default: ./watched)", "watch folder:", config.watch_folder);
    println!("  {:<28} {} (default: empty)", "drive folder id:", config.drive_folder_id);
    println!("  {:<28} {} (default: empty)", "drive folder name:", config.drive_folder_name);
    println!("  {:<28} {} (default: ffmpeg)", "ffmpeg path:", config.ffmpeg_path);
    println!();
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();
    print_config(&config);

    let dir = cli
        .dir
        .unwrap_or_else(|| PathBuf::from(&config.watch_folder));
    if !dir.is_dir() {
        return Err(format!(
            "the folder to scan ({:?}) does not exist; create it or pass a valid path via --dir or CADENZA_WATCH_FOLDER",
            dir
        )
        .into());
    }

    let credentials = config::credentials_path()?;
    let client = DriveClient::connect(&credentials).await?;

    let folder_id = resolve_folder(
        &client,
        &config.drive_folder_id,
        &config.drive_folder_name,
    )
    .await?;

    let transcoder = FfmpegTranscoder::new(config.ffmpeg_path.clone());
    let pipeline = PipelineService::new(client.clone(), transcoder, folder_id);

    if cli.watch {
        let organizer = Organizer::new(client);
        let watcher = WatchService::new(
            pipeline,
            organizer,
            SessionMetadata::default(),
            dir.clone(),
        );
        watcher.run().await?;
    } else {
        pipeline.scan_and_process(&dir).await?;
    }

    Ok(())
}
