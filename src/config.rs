use std::path::{Path, PathBuf};
use log::LevelFilter;
use serde::Deserialize;

/// Permission demandée par défaut dans le lien d'invitation: `MANAGE_NICKNAMES`.
pub const DEFAULT_PERMISSIONS: u64 = 1 << 27;

fn default_permissions() -> u64 {
    DEFAULT_PERMISSIONS
}

/// Configuration de l'application
///
/// Lue depuis un fichier JSON au démarrage du bot.
#[derive(Deserialize)]
pub struct Config {
    pub token: String,
    /// Permissions du lien d'invitation
    #[serde(default = "default_permissions")]
    pub permissions: u64,
    /// Niveau de log (`error`, `warn`, `info`, `debug`, `trace` ou `off`)
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(skip)]
    filepath: PathBuf,
}

impl Config {
    pub fn read_file<P: AsRef<Path>>(filepath: P) -> Result<Self, String> {
        let filepath = filepath.as_ref();
        let str_config = match std::fs::read_to_string(filepath) {
            Ok(v) => v,
            Err(e) => return Err(format!("Unable to read file {}: {}", filepath.to_string_lossy(), e)),
        };
        let mut config = match Self::from_json(&str_config) {
            Ok(v) => v,
            Err(e) => return Err(format!("Unable to parse {}: {}", filepath.to_string_lossy(), e)),
        };
        config.filepath = filepath.to_path_buf();
        Ok(config)
    }
    pub fn from_json(str_config: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(str_config).map_err(|e| e.to_string())?;
        if config.token.trim().is_empty() {
            return Err("token is empty".to_string());
        }
        Ok(config)
    }
    /// Niveau de log configuré. Sans configuration, `trace` en debug et `warn` en release.
    pub fn log_level(&self) -> Result<LevelFilter, String> {
        match &self.log_level {
            Some(level) => level.parse::<LevelFilter>().map_err(|_| format!("Invalid log level: {}", level)),
            None if cfg!(debug_assertions) => Ok(LevelFilter::Trace),
            None => Ok(LevelFilter::Warn),
        }
    }
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}
