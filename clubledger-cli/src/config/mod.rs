//! Run configuration loaded from TOML
//!
//! Lookup order: explicit `--config` path, `CLUBLEDGER_CONFIG`, `./clubledger.toml`,
//! then `<config dir>/clubledger/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dues::DEFAULT_MIN_PRACTICES;
use crate::sheets::SheetSelector;

pub const CONFIG_ENV_VAR: &str = "CLUBLEDGER_CONFIG";
const LOCAL_CONFIG_FILE: &str = "clubledger.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub attendance: AttendanceConfig,
    pub dues: DuesConfig,
}

/// Where the sign-in sheet lives and where its outputs go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttendanceConfig {
    pub workbook: PathBuf,
    pub raw_sheet: SheetSelector,
    pub summary_sheet: SheetSelector,
    pub presence_sheet: SheetSelector,
    /// Sign-in columns that are not events
    pub skip_columns: Vec<String>,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("Spring 2024 Attendance.xlsx"),
            raw_sheet: SheetSelector::Index(0),
            summary_sheet: SheetSelector::Index(1),
            presence_sheet: SheetSelector::Index(2),
            skip_columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuesConfig {
    pub workbook: PathBuf,
    pub paid_sheet: SheetSelector,
    pub trips_sheet: SheetSelector,
    pub ledger_sheet: SheetSelector,
    /// Workbook holding the attendance summary; the attendance workbook when unset
    pub summary_workbook: Option<PathBuf>,
    pub summary_sheet: SheetSelector,
    /// Members need strictly more practices than this
    pub min_practices: u32,
}

impl Default for DuesConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("Dues.xlsx"),
            paid_sheet: SheetSelector::from("Paid"),
            trips_sheet: SheetSelector::from("Trips"),
            ledger_sheet: SheetSelector::from("Master"),
            summary_workbook: None,
            summary_sheet: SheetSelector::from("totals"),
            min_practices: DEFAULT_MIN_PRACTICES,
        }
    }
}

impl Config {
    /// Load from the first config file found; defaults if there is none
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match find_config_file() {
            Some(path) => Self::from_file(&path),
            None => {
                log::warn!("No config file found; using defaults relative to the working directory");
                Ok(Self::default())
            }
        }
    }

    /// Parse `path`; relative workbook paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.attendance.workbook);
        resolve(&mut self.dues.workbook);
        if let Some(summary) = self.dues.summary_workbook.as_mut() {
            resolve(summary);
        }
    }

    /// Workbook the dues pipeline reads the attendance summary from
    pub fn summary_workbook(&self) -> &Path {
        self.dues
            .summary_workbook
            .as_deref()
            .unwrap_or(&self.attendance.workbook)
    }
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("clubledger").join("config.toml");
    user.exists().then_some(user)
}
