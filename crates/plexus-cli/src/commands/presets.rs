//! List built-in presets

use anyhow::Result;
use plexus_field::{FieldPreset, ParticleSet};
use plexus_core::SurfaceSize;

pub fn run() -> Result<()> {
    let reference = SurfaceSize::new(1920, 1080);
    println!("Presets (particle count at {}):", reference);
    for preset in FieldPreset::ALL {
        let config = preset.config();
        println!(
            "  {:<10} {:>4} particles, links < {}px  {}",
            preset.name(),
            ParticleSet::particle_count_for(reference, &config),
            config.connection_threshold,
            preset.description()
        );
    }
    Ok(())
}
