use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

mod color;
mod config;
mod display;

use config::Config;
use spinzoom::source;

#[derive(Parser, Debug)]
#[command(name = "spinzoom")]
#[command(author, version, about = "Rotate an image through a full turn, zoomed so no corners show")]
struct Args {
    /// Image to animate (defaults to the configured source path)
    image: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,

    /// Last angle in degrees (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    end: Option<f64>,

    /// Degrees between frames
    #[arg(long)]
    step: Option<f64>,

    /// Pause after each frame in milliseconds
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Shrink the image so its longest side is at most this many pixels (0 = off)
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Accent colors: spectrum, rainbow, fire, ocean, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Exit after the last frame instead of keeping it on screen
    #[arg(long)]
    exit_when_done: bool,

    /// Hide the progress line
    #[arg(long)]
    no_status: bool,

    /// Write logs to this file instead of stderr (stderr is silent while the animation is on screen)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("spinzoom=info".parse()?);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // stdout belongs to the terminal UI, and stderr shares its screen
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(display::terminal::quiet_while_screen_active(std::io::stderr))
            .init(),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    // Reject a bad sweep before touching the terminal
    config.animation.sequence()?;

    let original = source::load(&config.source.path, config.source.working_limit())?;
    info!(
        "Starting spinzoom on {} ({}x{})",
        config.source.path.display(),
        original.width(),
        original.height()
    );

    display::terminal::run(config, original).await
}
