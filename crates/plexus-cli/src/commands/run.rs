//! Real-time run of every section background at once

use anyhow::{Context, Result};
use plexus_core::SurfaceSize;
use plexus_field::{FieldConfig, FieldPreset};
use plexus_render::PixelSurface;
use plexus_runtime::{BackgroundId, FrameClock, Stage};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

pub struct RunArgs {
    pub size: SurfaceSize,
    pub seconds: f64,
    pub fps: f64,
    pub output: Option<String>,
    pub seed: Option<u32>,
}

#[derive(Default)]
struct SectionStats {
    edges: usize,
    peak_edges: usize,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut stage = Stage::new();
    let mut sections: Vec<(BackgroundId, FieldPreset)> = Vec::new();
    for preset in FieldPreset::ALL {
        let config = FieldConfig {
            seed: args.seed,
            ..preset.config()
        };
        let id = stage.mount(config, Some(PixelSurface::new(args.size)));
        sections.push((id, preset));
    }

    let mut clock = FrameClock::with_target_fps(args.fps);
    let mut stats: HashMap<BackgroundId, SectionStats> = HashMap::new();
    let started = Instant::now();

    tracing::info!(
        "running {} section(s) at {} for {:.1}s",
        sections.len(),
        args.size,
        args.seconds
    );

    while started.elapsed().as_secs_f64() < args.seconds {
        clock.tick();
        stage.frame();

        for (id, _) in &sections {
            if let Some(background) = stage.get(*id) {
                let edges = background.last_stats().edges;
                let entry = stats.entry(*id).or_default();
                entry.edges += edges;
                entry.peak_edges = entry.peak_edges.max(edges);
            }
        }

        std::thread::sleep(clock.time_until_next_frame(Instant::now()));
    }

    println!(
        "{} frame(s) in {:.2}s ({:.1} fps)",
        clock.frame_count,
        clock.total_time,
        clock.average_fps()
    );
    for (id, preset) in &sections {
        let Some(background) = stage.get(*id) else {
            continue;
        };
        let frames = background.frames_rendered().max(1);
        let section = stats.remove(id).unwrap_or_default();
        println!(
            "  {:<10} {:>4} particles  {:>7.1} avg edges  {:>5} peak",
            preset.name(),
            background.particles().len(),
            section.edges as f64 / frames as f64,
            section.peak_edges
        );
    }

    let released = stage.shutdown();
    if let Some(dir) = &args.output {
        let dir = Path::new(dir);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for (id, surface) in released {
            let Some((_, preset)) = sections.iter().find(|(s, _)| *s == id) else {
                continue;
            };
            let path = dir.join(format!("{}.png", preset.name()));
            surface
                .save_png(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
