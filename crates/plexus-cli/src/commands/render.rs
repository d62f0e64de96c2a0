//! Headless field-to-PNG render command

use super::FieldSource;
use anyhow::{Context, Result};
use plexus_core::SurfaceSize;
use plexus_render::PixelSurface;
use plexus_runtime::Stage;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub output: String,
    pub size: SurfaceSize,
    pub frames: u64,
    pub every: u64,
    pub resize_at: Option<(u64, SurfaceSize)>,
    pub source: FieldSource,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let config = args.source.resolve()?;
    let every = args.every.max(1);

    let output = Path::new(&args.output);
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let mut stage = Stage::new();
    let id = stage.mount(config, Some(PixelSurface::new(args.size)));

    let mut saved = 0;
    let mut edges_total = 0;
    for frame in 0..args.frames {
        if let Some((at, size)) = args.resize_at {
            if frame == at {
                stage.resize(id, size);
            }
        }

        stage.frame();

        let Some(background) = stage.get(id) else {
            break;
        };
        edges_total += background.last_stats().edges;

        if (frame + 1) % every == 0 {
            let Some(surface) = background.surface() else {
                continue;
            };
            let path = frame_path(output, frame);
            match surface.save_png(&path) {
                Ok(()) => saved += 1,
                Err(e) => tracing::warn!("skipping frame {frame}: {e}"),
            }
        }
    }

    if let Some(background) = stage.get(id) {
        println!(
            "Rendered {} frame(s) of {} particles, {:.1} edges/frame on average",
            background.frames_rendered(),
            background.particles().len(),
            edges_total as f64 / args.frames.max(1) as f64
        );
    }
    println!("Saved {} image(s) to {}", saved, output.display());

    stage.shutdown();
    Ok(())
}

fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{:05}.png", frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_paths_sort_lexically() {
        let dir = Path::new("out");
        assert_eq!(frame_path(dir, 7), Path::new("out/frame_00007.png"));
        assert!(frame_path(dir, 9) < frame_path(dir, 10));
    }

    #[test]
    fn renders_and_saves_frames() {
        let dir = std::env::temp_dir().join(format!("plexus-render-{}", std::process::id()));
        run(RenderArgs {
            output: dir.display().to_string(),
            size: SurfaceSize::new(160, 120),
            frames: 4,
            every: 2,
            resize_at: Some((2, SurfaceSize::new(80, 60))),
            source: FieldSource {
                seed: Some(1),
                ..FieldSource::default()
            },
        })
        .unwrap();

        assert!(dir.join("frame_00001.png").exists());
        assert!(dir.join("frame_00003.png").exists());
        assert!(!dir.join("frame_00000.png").exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
