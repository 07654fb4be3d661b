use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Everything the binaries read from a config file. Every field has a
/// default, so partial files are fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub time: TimeControl,
    pub perft: PerftConfig,
    pub log: LogConfig,
}

/// Clock settings handed to whatever component budgets thinking time. The
/// move generator and perft never look at these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    /// Time left on the clock
    pub clock_ms: u64,
    /// Moves until the next time control, 0 for sudden death
    pub moves_per_control: u32,
    /// Time added when a control is reached
    pub per_control_ms: u64,
    /// Time added after every move
    pub increment_ms: u64,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            clock_ms: 5 * 60 * 1000,
            moves_per_control: 0,
            per_control_ms: 0,
            increment_ms: 0,
        }
    }
}

impl TimeControl {
    /// Moves assumed left in the game when the control is sudden death.
    const SUDDEN_DEATH_HORIZON: u64 = 30;

    pub const fn clock(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }

    pub const fn increment(&self) -> Duration {
        Duration::from_millis(self.increment_ms)
    }

    /// Time to spend on the next move: an even share of the clock over the
    /// moves left in the control, plus the increment.
    pub fn move_budget(&self) -> Duration {
        let moves_left = match self.moves_per_control {
            0 => Self::SUDDEN_DEATH_HORIZON,
            n => u64::from(n),
        };
        Duration::from_millis(self.clock_ms / moves_left + self.increment_ms)
    }
}

impl Display for TimeControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "clock {} ms, {} moves/control, +{} ms per control, +{} ms per move",
            self.clock_ms, self.moves_per_control, self.per_control_ms, self.increment_ms
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerftConfig {
    /// Split the root moves over a rayon pool
    pub parallel: bool,
    /// Worker threads, 0 lets rayon decide
    pub threads: usize,
}

impl Default for PerftConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Console level: trace, debug, info, warn or error
    pub level: String,
    /// Also write debug logs to a file in the temp dir
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

impl LogConfig {
    pub fn level(&self) -> miette::Result<Level> {
        Level::from_str(&self.level)
            .into_diagnostic()
            .with_context(|| format!("Invalid log level '{}'", self.level))
    }
}

impl EngineConfig {
    /// Save to TOML File
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, toml_string).into_diagnostic()?;
        Ok(())
    }

    /// Load from a TOML File
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> miette::Result<Self> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("Reading config file {}", path.display()))?;
        Self::from_toml(&file_content)
    }

    pub fn from_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content)
            .into_diagnostic()
            .context("Parsing config TOML")
    }

    /// Applies the log section to the global subscriber.
    pub fn apply_logging(&self) -> miette::Result<()> {
        set_log_level(self.log.level()?)?;
        toggle_file_logging(self.log.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml(
            r#"
            [time]
            clock_ms = 60000
            moves_per_control = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.time.clock_ms, 60_000);
        assert_eq!(config.time.moves_per_control, 40);
        assert_eq!(config.time.increment_ms, 0);
        assert_eq!(config.perft, PerftConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(EngineConfig::from_toml("[time]\nclock_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "boxchess_config_test_{}.toml",
            std::process::id()
        ));
        let mut config = EngineConfig::default();
        config.time.increment_ms = 2_000;
        config.log.level = "debug".to_string();
        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_move_budget() {
        let sudden_death = TimeControl {
            clock_ms: 30_000,
            increment_ms: 500,
            ..Default::default()
        };
        assert_eq!(sudden_death.move_budget(), Duration::from_millis(1_500));

        let classical = TimeControl {
            clock_ms: 40_000,
            moves_per_control: 40,
            per_control_ms: 40_000,
            increment_ms: 0,
        };
        assert_eq!(classical.move_budget(), Duration::from_millis(1_000));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogConfig::default().level().unwrap(), Level::INFO);
        let bad = LogConfig {
            level: "loud".to_string(),
            file: false,
        };
        assert!(bad.level().is_err());
    }
}
