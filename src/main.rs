use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber;

use vidstitch::{
    config::Config,
    manifest::Manifest,
    pipeline::{generate_output_path, AssemblyEngine},
    scan::scan_video_files,
};

#[derive(Parser)]
#[command(
    name = "vidstitch",
    version,
    about = "Concatenate video clips into a single output file",
    long_about = "Vidstitch assembles an ordered list of video clips into one output file, \
                  with optional per-clip trimming, cropping and slow motion, rescaling to a \
                  common frame size, and an optional replacement audio track."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the clips listed in a manifest into one video
    Assemble {
        /// TOML manifest listing the clips in concatenation order
        #[arg(short, long)]
        manifest: PathBuf,

        /// Directory the timestamped output file is written to
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Audio track to overlay (overrides the manifest's audio entry)
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Configuration file (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the video files in a directory
    Scan {
        /// Directory to scan (non-recursive)
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    match cli.command {
        Command::Assemble {
            manifest,
            output_dir,
            audio,
            config,
        } => assemble(manifest, output_dir, audio, config).await,
        Command::Scan { dir } => scan(dir),
    }
}

async fn assemble(
    manifest_path: PathBuf,
    output_dir: PathBuf,
    audio: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    info!("Starting vidstitch v{}", env!("CARGO_PKG_VERSION"));

    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            let config = Config::from_file(&path)?;
            config.validate()?;
            config
        }
        None => Config::default(),
    };

    info!("Loading manifest from {:?}", manifest_path);
    let manifest = Manifest::from_file(&manifest_path)?;
    manifest.validate()?;

    // CLI flag wins over the manifest's audio entry
    let audio = audio.or(manifest.audio.clone());

    std::fs::create_dir_all(&output_dir)?;
    let output_path = generate_output_path(&output_dir, &config.output.prefix);

    let engine = AssemblyEngine::new(config);
    engine
        .assemble(&manifest.clips, &output_path, audio.as_deref())
        .await?;

    info!("Output saved to: {:?}", output_path);
    Ok(())
}

fn scan(dir: PathBuf) -> Result<()> {
    let files = scan_video_files(&dir)?;
    for file in &files {
        println!("{}", file.display());
    }
    info!("Found {} video files in {:?}", files.len(), dir);
    Ok(())
}
