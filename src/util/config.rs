use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::judicial::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// POST to an aggregator endpoint that returns the combined envelope.
    #[default]
    Backend,
    /// Query the three judicial APIs directly.
    Direct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub mode: ApiMode,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_decisions_url")]
    pub decisions_url: String,
    #[serde(default = "default_cases_url")]
    pub cases_url: String,
    #[serde(default = "default_hearings_url")]
    pub hearings_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_debug: bool,
}

fn default_search_url() -> String {
    "http://localhost:5000/api/buscar".to_string()
}
fn default_decisions_url() -> String {
    "https://api.poderjudicial.gob.do/Decisiones/Decisiones/ObtenerDecisiones".to_string()
}
fn default_cases_url() -> String {
    "https://api.poderjudicial.gob.do/Casos/Tramite/ObtenerDatosPorNuc".to_string()
}
fn default_hearings_url() -> String {
    "https://api.poderjudicial.gob.do/Audiencias/Audiencias/ObtenerAudienciasPorNuc".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::default(),
            search_url: default_search_url(),
            decisions_url: default_decisions_url(),
            cases_url: default_cases_url(),
            hearings_url: default_hearings_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        let mut candidates = Vec::new();

        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/lexdash/config.toml"));
        }

        // macOS: ~/Library/Application Support/lexdash/
        if let Some(proj_dirs) = ProjectDirs::from("", "", "lexdash") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                return Self::read(config_path);
            }
        }

        Ok(AppConfig::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    pub fn archive_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.archive.dir {
            return dir.clone();
        }
        if let Some(proj_dirs) = ProjectDirs::from("", "", "lexdash") {
            return proj_dirs.data_dir().join("searches");
        }
        PathBuf::from(".local/share/lexdash/searches")
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "lexdash") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/lexdash/logs")
    }
}
