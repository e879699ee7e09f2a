use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use spdlog::debug;

use wikiblog::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path {
        Some(path) => path,
        None => match get_config_path() {
            Some(path) => path,
            None => {
                debug!("No {} found, using defaults", CFG_FILE_NAME);
                return Ok(Config::default());
            }
        },
    };

    debug!("Reading config from {}", config_path.display());
    let config = read_config(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: &Option<PathBuf>) -> Result<PathBuf> {
    let path: PathBuf = match config_path {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .context("Could not find user config dir")?
            .join(CFG_FILE_NAME),
    };

    write_sample_cfg(&path)
        .with_context(|| format!("Could not write sample config to {}", path.display()))?;

    Ok(path)
}
