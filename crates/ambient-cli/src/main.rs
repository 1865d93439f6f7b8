//! Ambient CLI - device profiling and headless effect simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{classify, presets, simulate};

#[derive(Parser)]
#[command(name = "ambient")]
#[command(about = "Adaptive ambient particle effect tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a device and show the render budget it gets
    Classify {
        /// ios, android, web or other
        #[arg(long, default_value = "other")]
        platform: String,

        /// Logical width in points
        #[arg(long)]
        width: f32,

        /// Logical height in points
        #[arg(long)]
        height: f32,

        /// Pixel density (clamped to 3)
        #[arg(long, default_value = "2")]
        density: f32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run an effect session on a virtual clock
    Simulate {
        /// Settings file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Number of host frame callbacks
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Time between host callbacks in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f64,

        /// Make every Kth callback slow
        #[arg(long)]
        slow_every: Option<u32>,

        /// Duration of a slow callback in milliseconds
        #[arg(long, default_value = "80")]
        slow_ms: f64,

        /// Fixed particle RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the built-in presets
    Presets {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Classify {
            platform,
            width,
            height,
            density,
            json,
        } => classify::run(&platform, width, height, density, json),
        Commands::Simulate {
            config,
            frames,
            frame_ms,
            slow_every,
            slow_ms,
            seed,
            json,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            frame_ms,
            slow_every,
            slow_ms,
            seed,
            json,
        }),
        Commands::Presets { json } => presets::run(json),
    }
}
