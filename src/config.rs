use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::topology::{EdgeConfig, Preset};

pub const DEFAULT_REPORT_EVERY: u64 = 10_000;
pub const DEFAULT_DELAY_MS: u64 = 10;
pub const DEFAULT_POSITIONS: usize = 5;
pub const DEFAULT_PRESET: Preset = Preset::Torus;

// Torus chess: both armies face each other across the seam as well as the
// middle, so the back rows stay empty.
pub const DEFAULT_LAYOUT: &[&str] = &[
    "........",
    "N.PPPP.N",
    "..RKQR..",
    ".PBPPBP.",
    ".pbppbp.",
    "..rkqr..",
    "n.pppp.n",
    "........",
];

pub const SAVE_FOLDER: &str = "TopoChessPositions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub cores: usize,
    pub edges: EdgeConfig,
    pub positions: usize,
    pub report_every: u64,
    pub delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cores: num_cpus::get(),
            edges: EdgeConfig::preset(DEFAULT_PRESET),
            positions: DEFAULT_POSITIONS,
            report_every: DEFAULT_REPORT_EVERY,
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Reads `CORES`, `EDGES`, `POSITIONS`, `REPORT_EVERY`, `DELAY_MS` and
    /// `SEED`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(cores) = setting::<usize, _>(&lookup, "CORES")? {
            if cores == 0 {
                return Err(ConfigError::InvalidSetting {
                    name: "CORES",
                    value: cores.to_string(),
                });
            }
            config.cores = cores;
        }
        if let Some(edges) = lookup("EDGES") {
            config.edges = edges.parse()?;
        }
        if let Some(positions) = setting(&lookup, "POSITIONS")? {
            config.positions = positions;
        }
        if let Some(report_every) = setting(&lookup, "REPORT_EVERY")? {
            config.report_every = report_every;
        }
        if let Some(delay_ms) = setting(&lookup, "DELAY_MS")? {
            config.delay_ms = delay_ms;
        }
        config.seed = setting(&lookup, "SEED")?;
        Ok(config)
    }

    /// Seed for worker `core`, if the run is seeded.
    pub fn worker_seed(&self, core: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(core as u64))
    }
}

fn setting<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSetting { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = SearchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.edges, EdgeConfig::default());
        assert_eq!(config.positions, DEFAULT_POSITIONS);
        assert_eq!(config.report_every, DEFAULT_REPORT_EVERY);
        assert_eq!(config.delay_ms, DEFAULT_DELAY_MS);
        assert_eq!(config.seed, None);
        assert!(config.cores > 0);
    }

    #[test]
    fn variables_override_defaults() {
        let config = SearchConfig::from_lookup(lookup(&[
            ("CORES", "3"),
            ("EDGES", "s1, w1, n1, e1"),
            ("POSITIONS", "7"),
            ("DELAY_MS", "0"),
            ("SEED", "40"),
        ]))
        .unwrap();
        assert_eq!(config.cores, 3);
        assert_eq!(config.edges, EdgeConfig::preset(Preset::Mirrored));
        assert_eq!(config.positions, 7);
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.worker_seed(2), Some(42));
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            SearchConfig::from_lookup(lookup(&[("CORES", "lots")])),
            Err(ConfigError::InvalidSetting {
                name: "CORES",
                value: "lots".to_string()
            })
        );
        assert!(matches!(
            SearchConfig::from_lookup(lookup(&[("CORES", "0")])),
            Err(ConfigError::InvalidSetting { name: "CORES", .. })
        ));
        assert_eq!(
            SearchConfig::from_lookup(lookup(&[("EDGES", "x")])),
            Err(ConfigError::UnknownPreset("x".to_string()))
        );
    }

    #[test]
    fn default_layout_is_square_and_symmetric() {
        let board = crate::board::Board::from_rows(DEFAULT_LAYOUT).unwrap();
        assert_eq!((board.width(), board.height()), (8, 8));
        assert!(crate::filters::position_is_symmetric(&board));
    }
}
