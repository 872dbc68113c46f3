use crate::map::MAX_TILES;
use anyhow::{Context, ensure};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;

pub const CONFIG_PATH: &str = "isoview.json";

#[derive(SmartDefault, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[default(800)]
    pub window_width: u32,
    #[default(600)]
    pub window_height: u32,
    /// Side of a tile's cartesian square in pixels at zoom 1
    #[default(32)]
    pub tile_size: u32,
    #[default(64)]
    pub map_width: i32,
    #[default(64)]
    pub map_height: i32,
    pub seed: u64,
    /// Edge scroll distance per frame in unzoomed pixels
    #[default(6.)]
    pub scroll_speed: f64,
    /// How close to a window edge the mouse has to be to scroll, in unzoomed pixels
    #[default(2.)]
    pub edge_margin: f64,
    #[default(10)]
    pub frame_delay_ms: u64,
    #[default("data/isotiles.png".to_string())]
    pub tiles_path: String,
    #[default("data/character.png".to_string())]
    pub character_path: String,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[default("info".to_string())]
    pub log_level: String,
}

impl Config {
    /// Read config from `path`. A missing file just means defaults.
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let Ok(json) = std::fs::read_to_string(path) else {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        };

        let config = Self::from_json(&json).with_context(|| format!("in {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.window_width > 0 && self.window_height > 0,
            "window size must be positive, got {}x{}",
            self.window_width,
            self.window_height
        );
        ensure!(
            self.map_width > 0 && self.map_height > 0,
            "map size must be positive, got {}x{}",
            self.map_width,
            self.map_height
        );
        ensure!(
            self.map_width.checked_mul(self.map_height).is_some_and(|n| n <= MAX_TILES),
            "map can have at most {MAX_TILES} tiles, got {}x{}",
            self.map_width,
            self.map_height
        );
        ensure!(
            self.scroll_speed.is_finite() && self.edge_margin.is_finite(),
            "scroll_speed and edge_margin must be finite"
        );
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("unknown log level \"{}\"", self.log_level))
    }
}
