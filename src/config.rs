//! Runtime configuration from environment variables.
//!
//! - `RECALL_SEED`: RNG seed (default: derived from the clock)
//! - `RECALL_DIFFICULTY`: `fast`/`normal`/`slow` or `0.5`/`2`/`10` (default: normal)
//! - `RECALL_BELL`: set to "0" or "false" to silence the terminal bell
//! - `RECALL_ASSET_DIR`: directory with cue assets to verify
//! - `RECALL_LOG_PATH`: log file; logging is off when unset
//! - `RECALL_LOG`: `tracing` filter directive (default: info)
//!
//! Unparseable values fall back to the defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecallConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
    pub bell: bool,
    pub asset_dir: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            difficulty: Difficulty::default(),
            bell: true,
            asset_dir: None,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RecallConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("RECALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let difficulty = non_empty("RECALL_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();

        let bell = non_empty("RECALL_BELL")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);

        Self {
            seed,
            difficulty,
            bell,
            asset_dir: non_empty("RECALL_ASSET_DIR").map(PathBuf::from),
            log_path: non_empty("RECALL_LOG_PATH").map(PathBuf::from),
            log_filter: non_empty("RECALL_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> RecallConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RecallConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn reads_every_variable() {
        let c = config(&[
            ("RECALL_SEED", "42"),
            ("RECALL_DIFFICULTY", "slow"),
            ("RECALL_BELL", "false"),
            ("RECALL_ASSET_DIR", "/tmp/cues"),
            ("RECALL_LOG_PATH", "/tmp/recall.log"),
            ("RECALL_LOG", "debug"),
        ]);
        assert_eq!(c.seed, 42);
        assert_eq!(c.difficulty, Difficulty::Slow);
        assert!(!c.bell);
        assert_eq!(c.asset_dir, Some(PathBuf::from("/tmp/cues")));
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/recall.log")));
        assert_eq!(c.log_filter, "debug");
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let c = config(&[
            ("RECALL_DIFFICULTY", "3.5"),
            ("RECALL_BELL", "yes"),
            ("RECALL_LOG_PATH", "   "),
        ]);
        assert_eq!(c.difficulty, Difficulty::Normal);
        assert!(c.bell);
        assert_eq!(c.log_path, None);
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn seconds_select_presets() {
        assert_eq!(config(&[("RECALL_DIFFICULTY", "0.5")]).difficulty, Difficulty::Fast);
        assert_eq!(config(&[("RECALL_DIFFICULTY", "10")]).difficulty, Difficulty::Slow);
    }
}
