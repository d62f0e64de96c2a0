//! Plexus CLI - Command-line interface for Plexus particle fields

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, presets, render, run, FieldSource};
use plexus_core::SurfaceSize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plexus")]
#[command(about = "Animated particle-field backgrounds, rendered headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render frames of one background to PNG files
    Render {
        /// Output directory for frame images
        #[arg(short, long, default_value = "frames")]
        output: String,

        /// Surface width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Number of frames to simulate
        #[arg(long, default_value = "60")]
        frames: u64,

        /// Save every Nth frame
        #[arg(long, default_value = "1")]
        every: u64,

        /// Resize the surface before a frame (FRAME:WIDTHxHEIGHT)
        #[arg(long, value_parser = parse_resize)]
        resize_at: Option<(u64, SurfaceSize)>,

        #[command(flatten)]
        source: FieldSource,
    },

    /// Animate the about, contact and projects backgrounds together in real time
    Run {
        /// Surface width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "720")]
        height: u32,

        /// How long to run
        #[arg(long, default_value = "5")]
        seconds: f64,

        /// Target frame rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Directory to write each section's last frame to
        #[arg(short, long)]
        output: Option<String>,

        /// PRNG seed shared by all sections
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Print the effective field configuration as TOML
    Config {
        #[command(flatten)]
        source: FieldSource,
    },

    /// List the built-in presets
    Presets,
}

fn parse_resize(s: &str) -> Result<(u64, SurfaceSize), String> {
    let (frame, dims) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:WIDTHxHEIGHT, got '{}'", s))?;
    let (w, h) = dims
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", dims))?;
    let frame: u64 = frame.trim().parse().map_err(|e| format!("invalid frame: {}", e))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("invalid width: {}", e))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("invalid height: {}", e))?;
    Ok((frame, SurfaceSize::new(w, h)))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            output,
            width,
            height,
            frames,
            every,
            resize_at,
            source,
        } => render::run(render::RenderArgs {
            output,
            size: SurfaceSize::new(width, height),
            frames,
            every,
            resize_at,
            source,
        }),
        Commands::Run {
            width,
            height,
            seconds,
            fps,
            output,
            seed,
        } => run::run(run::RunArgs {
            size: SurfaceSize::new(width, height),
            seconds,
            fps,
            output,
            seed,
        }),
        Commands::Config { source } => config::run(&source),
        Commands::Presets => presets::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_resize_argument() {
        assert_eq!(parse_resize("30:640x480").unwrap(), (30, SurfaceSize::new(640, 480)));
        assert!(parse_resize("640x480").is_err());
        assert!(parse_resize("3:640").is_err());
        assert!(parse_resize("x:1x1").is_err());
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from([
            "plexus",
            "render",
            "--preset",
            "contact",
            "--frames",
            "3",
            "--resize-at",
            "2:100x50",
            "--seed",
            "9",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { frames, resize_at, source, .. } => {
                assert_eq!(frames, 3);
                assert_eq!(resize_at, Some((2, SurfaceSize::new(100, 50))));
                assert_eq!(source.preset.as_deref(), Some("contact"));
                assert_eq!(source.seed, Some(9));
            }
            _ => panic!("expected render"),
        }
    }
}
