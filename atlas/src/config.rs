#![allow(dead_code)]
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "atlas.yaml";
pub const DEFAULT_DB_PATH: &str = "empresas.db";

#[derive(Debug, Default, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct MapConfig {
    /// GeoJSON file with one feature per province.
    pub geodata: Option<PathBuf>,
    /// Feature property holding the province name.
    pub name_property: Option<String>,
    pub pick_radius_sq: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    pub store: Option<StoreConfig>,
    pub map: Option<MapConfig>,
}

impl Config {
    /// `--db` wins over the config file, which wins over the default.
    pub fn db_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.store.as_ref().and_then(|s| s.path.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }
}

/// Reads the YAML config at `path`, or `./atlas.yaml` when no path is given
/// and that file exists. A missing or malformed file yields `None`.
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { p.to_path_buf() } else { return None; }
        }
    };
    let s = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read config");
            return None;
        }
    };
    match serde_yaml::from_str(&s) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed config");
            None
        }
    }
}
