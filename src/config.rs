// Dashboard settings, read from an optional `dashboard.json` in the working
// directory. Any field left out of the file keeps its default.
use crate::error::{DashboardError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub store_sales_file: String,
    pub monthly_view_file: String,
    pub network_sales_file: String,
    pub output_dir: PathBuf,
    /// Ranking size inside the store detail section.
    pub store_top_n: usize,
    /// Ranking size for the network-wide product/consultant rankings.
    pub network_top_n: usize,
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("."),
            store_sales_file: "Database Teste PS - VISÃO LOJAS.csv".to_string(),
            monthly_view_file: "Database Teste PS - VISÃO MENSAL.csv".to_string(),
            network_sales_file: "Database Teste PS - VENDAS REDE.csv".to_string(),
            output_dir: PathBuf::from("dashboard_output"),
            store_top_n: 3,
            network_top_n: 10,
            preview_rows: 50,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&text).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate(path)?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.store_top_n == 0 || self.network_top_n == 0 {
            return Err(DashboardError::Config {
                path: path.to_path_buf(),
                message: "ranking sizes must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn store_sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_sales_file)
    }

    pub fn monthly_view_path(&self) -> PathBuf {
        self.data_dir.join(&self.monthly_view_file)
    }

    pub fn network_sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.network_sales_file)
    }
}
