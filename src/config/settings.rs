//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game_of_life::Pattern;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub cadence: CadenceConfig,
    pub display: DisplayConfig,
    pub run: RunConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub border_policy: BorderPolicy,
}

/// How the outermost ring of cells evolves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Border cells are never evaluated and keep their last written value
    #[default]
    Frozen,
    /// Border cells are never evaluated and are cleared on every step
    Dead,
    /// Toroidal topology, every cell is evaluated
    Wrap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceConfig {
    pub mode: CadenceMode,
    pub interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub adjust_ms: u64,
    pub frames_per_step: u32,
    pub max_frames_per_step: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceMode {
    WallClock,
    FrameCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Pixels per cell edge
    pub scale: u32,
    pub min_scale: u32,
    pub max_scale: u32,
    pub frame_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub generations: u64,
    pub stop_when_settled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
    pub pattern_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_file: Option<PathBuf>,
    pub snapshot_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 400,
                height: 400,
                border_policy: BorderPolicy::Frozen,
            },
            cadence: CadenceConfig {
                mode: CadenceMode::WallClock,
                interval_ms: 2000,
                min_interval_ms: 200,
                max_interval_ms: 4900,
                adjust_ms: 100,
                frames_per_step: 20,
                max_frames_per_step: 240,
            },
            display: DisplayConfig {
                scale: 8,
                min_scale: 1,
                max_scale: 32,
                frame_rate: 60,
            },
            run: RunConfig {
                generations: 100,
                stop_when_settled: false,
            },
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        let cadence = &self.cadence;
        if cadence.min_interval_ms == 0 || cadence.min_interval_ms > cadence.max_interval_ms {
            anyhow::bail!(
                "Interval bounds [{}, {}] ms are invalid",
                cadence.min_interval_ms,
                cadence.max_interval_ms
            );
        }
        if !(cadence.min_interval_ms..=cadence.max_interval_ms).contains(&cadence.interval_ms) {
            anyhow::bail!(
                "Step interval {} ms lies outside [{}, {}] ms",
                cadence.interval_ms,
                cadence.min_interval_ms,
                cadence.max_interval_ms
            );
        }
        if cadence.adjust_ms == 0 {
            anyhow::bail!("Interval adjustment must be positive");
        }
        if cadence.frames_per_step == 0 || cadence.frames_per_step > cadence.max_frames_per_step {
            anyhow::bail!(
                "Frames per step {} lies outside [1, {}]",
                cadence.frames_per_step,
                cadence.max_frames_per_step
            );
        }

        let display = &self.display;
        if display.min_scale == 0
            || display.min_scale > display.max_scale
            || !(display.min_scale..=display.max_scale).contains(&display.scale)
        {
            anyhow::bail!(
                "Scale {} must lie inside [{}, {}] with a minimum of at least 1",
                display.scale,
                display.min_scale,
                display.max_scale
            );
        }
        if display.frame_rate == 0 {
            anyhow::bail!("Frame rate must be positive");
        }

        if let Some(ref file) = self.input.pattern_file {
            if !file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", file.display());
            }
        }
        if let Some(ref name) = self.input.pattern_name {
            Pattern::named(name)?;
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(border_policy) = cli_overrides.border_policy {
            self.grid.border_policy = border_policy;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.cadence.mode = CadenceMode::WallClock;
            self.cadence.interval_ms = interval_ms;
        }
        if let Some(frames) = cli_overrides.frames_per_step {
            self.cadence.mode = CadenceMode::FrameCount;
            self.cadence.frames_per_step = frames;
        }
        if let Some(generations) = cli_overrides.generations {
            self.run.generations = generations;
        }
        if let Some(ref file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(file.clone());
            self.input.pattern_name = None;
        }
        if let Some(ref name) = cli_overrides.pattern_name {
            self.input.pattern_name = Some(name.clone());
            self.input.pattern_file = None;
        }
        if let Some(ref report) = cli_overrides.report_file {
            self.output.report_file = Some(report.clone());
        }
        if let Some(ref snapshot) = cli_overrides.snapshot_file {
            self.output.snapshot_file = Some(snapshot.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub border_policy: Option<BorderPolicy>,
    pub interval_ms: Option<u64>,
    pub frames_per_step: Option<u32>,
    pub generations: Option<u64>,
    pub pattern_file: Option<PathBuf>,
    pub pattern_name: Option<String>,
    pub report_file: Option<PathBuf>,
    pub snapshot_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.width, 400);
        assert_eq!(settings.cadence.min_interval_ms, 200);
        assert_eq!(settings.cadence.max_interval_ms, 4900);
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/life.yaml");

        let mut settings = Settings::default();
        settings.grid.border_policy = BorderPolicy::Wrap;
        settings.cadence.mode = CadenceMode::FrameCount;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.grid.border_policy, BorderPolicy::Wrap);
        assert_eq!(loaded.cadence.mode, CadenceMode::FrameCount);
    }

    #[test]
    fn test_policy_names_in_yaml() {
        let yaml = serde_yaml::to_string(&BorderPolicy::Frozen).unwrap();
        assert_eq!(yaml.trim(), "frozen");
        let mode: CadenceMode = serde_yaml::from_str("frame_count").unwrap();
        assert_eq!(mode, CadenceMode::FrameCount);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.grid.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.cadence.interval_ms = 100;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.display.min_scale = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.pattern_name = Some("no-such-pattern".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(PathBuf::from("/definitely/missing/pattern.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.input.pattern_file = Some(PathBuf::from("seed.txt"));

        let overrides = CliOverrides {
            width: Some(64),
            frames_per_step: Some(5),
            pattern_name: Some("glider".to_string()),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.grid.width, 64);
        assert_eq!(settings.grid.height, 400);
        assert_eq!(settings.cadence.mode, CadenceMode::FrameCount);
        assert_eq!(settings.cadence.frames_per_step, 5);
        assert_eq!(settings.input.pattern_name.as_deref(), Some("glider"));
        assert!(settings.input.pattern_file.is_none());
    }
}
