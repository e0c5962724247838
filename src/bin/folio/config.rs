use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from)) {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(anyhow!("Could not find {}", CFG_FILE_NAME)),
        Some(x) => x,
    };

    eprintln!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    // Relative paths are relative to the config file, not to where folio runs from
    if let Some(cfg_dir) = config_path.parent() {
        if config.paths.posts_dir.is_relative() {
            config.paths.posts_dir = cfg_dir.join(&config.paths.posts_dir);
        }
        if config.paths.out_dir.is_relative() {
            config.paths.out_dir = cfg_dir.join(&config.paths.out_dir);
        }
    }

    if let Some(ref mut log) = config.log {
        if log.location.is_none() && !log.log_to_console {
            log.location = dirs::cache_dir().map(|dir| dir.join("folio").join("log").join("folio.log"));
        }
    }

    Ok(config)
}
