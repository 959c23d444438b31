use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{DEFAULT_PALETTE, Palette};
use crate::util::clog;

/// Local storage key holding an optional JSON override of [`GameConfig`].
pub const CONFIG_STORAGE_KEY: &str = "m3_config";

/// Fewest colors for which a refill can always settle into a stable board.
pub const MIN_PALETTE_COLORS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// CSS colors; tile colors are indices into this list.
    pub palette: Vec<String>,
    /// Pause between cascade steps. 0 resolves a cascade in one go.
    pub cascade_delay_ms: u32,
    /// Draws per cell during generation before a run is tolerated.
    pub max_resample: u32,
    pub cell_gap: f64,
    pub board_padding: f64,
    /// Dragged tile offset limit, in cell sizes.
    pub drag_clamp: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cascade_delay_ms: 400,
            max_resample: 100,
            cell_gap: 2.0,
            board_padding: 6.0,
            drag_clamp: 0.9,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.palette()?;
        if !(self.cell_gap.is_finite() && self.cell_gap >= 0.0) {
            return Err(ConfigError::Validation("cell_gap must be >= 0".into()));
        }
        if !(self.board_padding.is_finite() && self.board_padding >= 0.0) {
            return Err(ConfigError::Validation("board_padding must be >= 0".into()));
        }
        if !(self.drag_clamp.is_finite() && self.drag_clamp > 0.0) {
            return Err(ConfigError::Validation("drag_clamp must be > 0".into()));
        }
        Ok(())
    }

    /// The playable palette. Fewer than [`MIN_PALETTE_COLORS`] colors would
    /// let a cascade refill runs forever, so those are rejected here.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        if self.palette.len() < MIN_PALETTE_COLORS {
            return Err(ConfigError::Validation(format!(
                "palette needs at least {MIN_PALETTE_COLORS} colors, got {}",
                self.palette.len()
            )));
        }
        Palette::new(self.palette.clone())
    }

    /// Reads the override from local storage; anything missing or invalid
    /// falls back to the defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                clog(&format!("config: {e}; using defaults"));
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
