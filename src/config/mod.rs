pub mod cli;
pub mod toml_config;

use crate::domain::model::DEFAULT_CREDITS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::Path;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./data";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "course-planner")]
#[command(about = "Plan courses across years and terms and track your grades")]
pub struct CliConfig {
    /// Settings file; ignored when it does not exist
    #[arg(long, default_value = "planner.toml")]
    pub config: String,

    /// Directory holding the course list and timetable files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Index of the user timetable to open
    #[arg(long)]
    pub timetable: Option<u32>,

    /// Credits assumed for a course missing from the course list
    #[arg(long)]
    pub default_credits: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the settings file, then command-line flags.
    pub fn resolve(&self) -> Result<PlannerConfig> {
        let mut config = PlannerConfig::default();

        if Path::new(&self.config).exists() {
            tracing::debug!("Loading settings from {}", self.config);
            TomlConfig::from_file(&self.config)?.apply_to(&mut config);
        } else {
            tracing::debug!("No settings file at {}, using defaults", self.config);
        }

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(credits) = self.default_credits {
            config.default_credits = credits;
        }
        if let Some(index) = self.timetable {
            config.initial_timetable = index;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub data_dir: String,
    pub default_credits: u32,
    pub initial_timetable: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            default_credits: DEFAULT_CREDITS,
            initial_timetable: 0,
        }
    }
}

impl PlannerConfig {
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_positive_number("default_credits", self.default_credits, 1)?;
        Ok(())
    }
}

impl ConfigProvider for PlannerConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn default_credits(&self) -> u32 {
        self.default_credits
    }

    fn initial_timetable(&self) -> u32 {
        self.initial_timetable
    }
}
