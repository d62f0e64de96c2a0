//! Field configuration (parsed from TOML) and the built-in section presets

use plexus_core::{Color, PlexusError, Result};
use std::path::Path;
use std::str::FromStr;

/// Smallest accepted area per particle; keeps the O(n²) edge pass bounded
pub const MIN_AREA_PER_PARTICLE: f32 = 100.0;

/// What happens when a particle crosses the surface edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Move first, then flip the velocity component that left the bounds.
    /// A particle may be drawn up to one step outside the surface.
    Reflect,
    /// Flip the velocity and clamp the position back inside before drawing
    Clamp,
}

impl BoundaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Clamp => "clamp",
        }
    }
}

/// Draw order of edges relative to particles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layering {
    EdgesBelow,
    EdgesAbove,
}

impl Layering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layering::EdgesBelow => "edges_below",
            Layering::EdgesAbove => "edges_above",
        }
    }
}

/// Every recognized option of one particle background
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// One particle per this many square pixels
    pub area_per_particle: f32,
    /// Cap on the derived particle count, 0 for none
    pub max_particles: usize,
    /// Pixel distance under which two particles are linked
    pub connection_threshold: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub particle_color: Color,
    pub line_color: Color,
    pub line_width: f32,
    /// Edge alpha at intensity 1
    pub line_opacity: f32,
    pub background: Color,
    /// 0 clears every frame; otherwise the alpha of a background fill that
    /// leaves fading trails
    pub trail_fade: f32,
    pub boundary: BoundaryMode,
    pub layering: Layering,
    pub seed: Option<u32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: 10_000.0,
            max_particles: 0,
            connection_threshold: 120.0,
            speed_min: 0.1,
            speed_max: 0.6,
            radius_min: 1.0,
            radius_max: 3.0,
            opacity_min: 0.3,
            opacity_max: 0.9,
            particle_color: Color::from_hex(0x38bdf8),
            line_color: Color::from_hex(0x38bdf8),
            line_width: 1.0,
            line_opacity: 0.5,
            background: Color::from_hex(0x0f172a),
            trail_fade: 0.0,
            boundary: BoundaryMode::Reflect,
            layering: Layering::EdgesBelow,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse a FieldConfig from a TOML table. A `preset` key selects the base
    /// configuration that the remaining keys override.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = match table.get("preset").and_then(|v| v.as_str()) {
            Some(name) => name.parse::<FieldPreset>()?.config(),
            None => Self::default(),
        };

        if let Some(v) = table.get("area_per_particle") {
            config.area_per_particle = toml_f32(v, config.area_per_particle);
        }
        if let Some(v) = table.get("max_particles") {
            config.max_particles = v.as_integer().unwrap_or(0).max(0) as usize;
        }
        if let Some(v) = table.get("connection_threshold") {
            config.connection_threshold = toml_f32(v, config.connection_threshold);
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, config.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, config.speed_max);
        }
        if let Some(v) = table.get("radius_min") {
            config.radius_min = toml_f32(v, config.radius_min);
        }
        if let Some(v) = table.get("radius_max") {
            config.radius_max = toml_f32(v, config.radius_max);
        }
        if let Some(v) = table.get("opacity_min") {
            config.opacity_min = toml_f32(v, config.opacity_min);
        }
        if let Some(v) = table.get("opacity_max") {
            config.opacity_max = toml_f32(v, config.opacity_max);
        }
        if let Some(v) = table.get("particle_color") {
            config.particle_color = toml_color(v, "particle_color")?;
        }
        if let Some(v) = table.get("line_color") {
            config.line_color = toml_color(v, "line_color")?;
        }
        if let Some(v) = table.get("line_width") {
            config.line_width = toml_f32(v, config.line_width);
        }
        if let Some(v) = table.get("line_opacity") {
            config.line_opacity = toml_f32(v, config.line_opacity);
        }
        if let Some(v) = table.get("background") {
            config.background = toml_color(v, "background")?;
        }
        if let Some(v) = table.get("trail_fade") {
            config.trail_fade = toml_f32(v, config.trail_fade);
        }
        if let Some(v) = table.get("boundary") {
            config.boundary = match v.as_str().unwrap_or("reflect") {
                "reflect" => BoundaryMode::Reflect,
                "clamp" => BoundaryMode::Clamp,
                other => {
                    return Err(PlexusError::InvalidConfig(format!(
                        "boundary must be \"reflect\" or \"clamp\", got \"{other}\""
                    )))
                }
            };
        }
        if let Some(v) = table.get("layering") {
            config.layering = match v.as_str().unwrap_or("edges_below") {
                "edges_below" => Layering::EdgesBelow,
                "edges_above" => Layering::EdgesAbove,
                other => {
                    return Err(PlexusError::InvalidConfig(format!(
                        "layering must be \"edges_below\" or \"edges_above\", got \"{other}\""
                    )))
                }
            };
        }
        if let Some(v) = table.get("seed") {
            let seed = v
                .as_integer()
                .and_then(|s| u32::try_from(s).ok())
                .ok_or_else(|| {
                    PlexusError::InvalidConfig(format!(
                        "seed must be an integer in 0..={}, got {v}",
                        u32::MAX
                    ))
                })?;
            config.seed = Some(seed);
        }

        Ok(config.sanitized())
    }

    /// Parse a TOML document. Keys may sit at the top level or under `[field]`.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let doc: toml::value::Table = toml::from_str(s)?;
        match doc.get("field").and_then(|v| v.as_table()) {
            Some(table) => Self::from_toml(table),
            None => Self::from_toml(&doc),
        }
    }

    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to a TOML document that `from_toml_str` accepts
    pub fn to_toml_string(&self) -> Result<String> {
        use toml::Value;

        let mut table = toml::value::Table::new();
        let mut put = |key: &str, value: Value| {
            table.insert(key.to_string(), value);
        };
        put("area_per_particle", Value::Float(self.area_per_particle as f64));
        put("max_particles", Value::Integer(self.max_particles as i64));
        put("connection_threshold", Value::Float(self.connection_threshold as f64));
        put("speed_min", Value::Float(self.speed_min as f64));
        put("speed_max", Value::Float(self.speed_max as f64));
        put("radius_min", Value::Float(self.radius_min as f64));
        put("radius_max", Value::Float(self.radius_max as f64));
        put("opacity_min", Value::Float(self.opacity_min as f64));
        put("opacity_max", Value::Float(self.opacity_max as f64));
        put("particle_color", Value::String(self.particle_color.to_hex_string()));
        put("line_color", Value::String(self.line_color.to_hex_string()));
        put("line_width", Value::Float(self.line_width as f64));
        put("line_opacity", Value::Float(self.line_opacity as f64));
        put("background", Value::String(self.background.to_hex_string()));
        put("trail_fade", Value::Float(self.trail_fade as f64));
        put("boundary", Value::String(self.boundary.as_str().to_string()));
        put("layering", Value::String(self.layering.as_str().to_string()));
        if let Some(seed) = self.seed {
            put("seed", Value::Integer(seed as i64));
        }

        Ok(toml::to_string(&table)?)
    }

    /// Clamp every value into its safe range. Invalid input never fails the
    /// animation; it is corrected and reported.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        clamp_field(
            "area_per_particle",
            &mut self.area_per_particle,
            defaults.area_per_particle,
            MIN_AREA_PER_PARTICLE,
            f32::MAX,
        );
        clamp_field(
            "connection_threshold",
            &mut self.connection_threshold,
            defaults.connection_threshold,
            0.0,
            f32::MAX,
        );
        clamp_field("speed_min", &mut self.speed_min, defaults.speed_min, 0.0, f32::MAX);
        clamp_field("speed_max", &mut self.speed_max, defaults.speed_max, 0.0, f32::MAX);
        clamp_field("radius_min", &mut self.radius_min, defaults.radius_min, 0.1, f32::MAX);
        clamp_field("radius_max", &mut self.radius_max, defaults.radius_max, 0.1, f32::MAX);
        clamp_field("opacity_min", &mut self.opacity_min, defaults.opacity_min, 0.0, 1.0);
        clamp_field("opacity_max", &mut self.opacity_max, defaults.opacity_max, 0.0, 1.0);
        clamp_field("line_width", &mut self.line_width, defaults.line_width, 0.0, f32::MAX);
        clamp_field("line_opacity", &mut self.line_opacity, defaults.line_opacity, 0.0, 1.0);
        clamp_field("trail_fade", &mut self.trail_fade, defaults.trail_fade, 0.0, 1.0);

        order_range("speed", &mut self.speed_min, &mut self.speed_max);
        order_range("radius", &mut self.radius_min, &mut self.radius_max);
        order_range("opacity", &mut self.opacity_min, &mut self.opacity_max);

        self
    }
}

fn clamp_field(name: &str, value: &mut f32, default: f32, min: f32, max: f32) {
    if !value.is_finite() {
        tracing::warn!("{name} is not finite, using default {default}");
        *value = default;
        return;
    }
    let clamped = value.clamp(min, max);
    if clamped != *value {
        tracing::warn!("{name} = {} out of range, clamped to {clamped}", *value);
        *value = clamped;
    }
}

fn order_range(name: &str, min: &mut f32, max: &mut f32) {
    if *min > *max {
        tracing::warn!("{name}_min > {name}_max, swapping");
        std::mem::swap(min, max);
    }
}

/// Tuned configurations for the site's three animated sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPreset {
    About,
    Contact,
    Projects,
}

impl FieldPreset {
    pub const ALL: [FieldPreset; 3] = [
        FieldPreset::About,
        FieldPreset::Contact,
        FieldPreset::Projects,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldPreset::About => "about",
            FieldPreset::Contact => "contact",
            FieldPreset::Projects => "projects",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FieldPreset::About => "sparse accent field on the secondary background",
            FieldPreset::Contact => "slow, dense field with short links",
            FieldPreset::Projects => "fast field with long faint links and trails",
        }
    }

    pub fn config(&self) -> FieldConfig {
        let base = FieldConfig::default();
        match self {
            FieldPreset::About => FieldConfig {
                area_per_particle: 12_000.0,
                connection_threshold: 130.0,
                background: Color::from_hex(0x1e293b),
                ..base
            },
            FieldPreset::Contact => FieldConfig {
                area_per_particle: 8_000.0,
                connection_threshold: 90.0,
                speed_min: 0.05,
                speed_max: 0.3,
                particle_color: Color::from_hex(0xf8fafc),
                line_color: Color::from_hex(0x94a3b8),
                line_opacity: 0.4,
                ..base
            },
            FieldPreset::Projects => FieldConfig {
                area_per_particle: 15_000.0,
                connection_threshold: 160.0,
                speed_min: 0.3,
                speed_max: 1.0,
                radius_min: 1.5,
                radius_max: 2.5,
                line_opacity: 0.3,
                trail_fade: 0.25,
                ..base
            },
        }
    }
}

impl FromStr for FieldPreset {
    type Err = PlexusError;

    fn from_str(s: &str) -> Result<Self> {
        FieldPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlexusError::UnknownPreset(s.to_string()))
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_color(v: &toml::Value, key: &str) -> Result<Color> {
    if let Some(s) = v.as_str() {
        return Color::parse_hex(s)
            .ok_or_else(|| PlexusError::InvalidConfig(format!("{key}: invalid hex color \"{s}\"")));
    }
    if let Some(arr) = v.as_array() {
        if arr.len() == 3 || arr.len() == 4 {
            let c = |i: usize, d: f32| arr.get(i).map(|x| toml_f32(x, d)).unwrap_or(d);
            return Ok(Color::new(c(0, 0.0), c(1, 0.0), c(2, 0.0), c(3, 1.0)));
        }
    }
    Err(PlexusError::InvalidConfig(format!(
        "{key}: expected \"#rrggbb[aa]\" or [r, g, b, a]"
    )))
}
