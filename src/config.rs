use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::splice::SpliceMode;

pub const DEFAULT_SCAN_ROOT: &str = "wiki";
pub const DEFAULT_DESTINATION: &str = "README.md";
pub const DEFAULT_BASE_URL: &str = "https://8hantanu.net/wiki";
pub const DEFAULT_SENTINEL: &str = "# Shantanu's blog";
pub const DEFAULT_SUBTITLE: &str = "**Collection of the latest and greatest pages from the wiki**";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub scan_root: PathBuf,
    pub destination_path: PathBuf,
    pub skip_hidden: bool,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            scan_root: PathBuf::from(DEFAULT_SCAN_ROOT),
            destination_path: PathBuf::from(DEFAULT_DESTINATION),
            skip_hidden: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Index {
    pub base_url: String,
    /// Line that starts the generated section, usually a top level heading
    pub sentinel_heading: String,
    pub subtitle: String,
    pub mode: SpliceMode,
}

impl Default for Index {
    fn default() -> Self {
        Index {
            base_url: DEFAULT_BASE_URL.to_string(),
            sentinel_heading: DEFAULT_SENTINEL.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            mode: SpliceMode::Section,
        }
    }
}

fn is_fence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("```") || line.starts_with("~~~")
}

impl Index {
    /// Rejects values that would stop the generated section from being found again
    /// on the next run.
    pub fn validate(&self) -> io::Result<()> {
        let sentinel = self.sentinel_heading.trim();
        if sentinel.is_empty() || sentinel.contains('\n') || is_fence(sentinel) {
            return Err(io::Error::new(ErrorKind::InvalidData,
                format!("Invalid sentinel_heading {:?}: expected a single line outside a code fence", self.sentinel_heading)));
        }

        if let Some(line) = self.subtitle.lines().find(|l| l.trim_start().starts_with("# ") || is_fence(l)) {
            return Err(io::Error::new(ErrorKind::InvalidData,
                format!("Invalid subtitle line {:?}: top level headings and code fences are not allowed", line)));
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub index: Index,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let cur_exe = match env::current_exe() {
        Ok(exe) => exe,
        Err(_) => return path,
    };
    match cur_exe.parent().and_then(|p| p.to_str()) {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", exe_dir)),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.scan_root = parse_path(cfg.paths.scan_root);
    cfg.paths.destination_path = parse_path(cfg.paths.destination_path);
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }
    cfg.index.validate()?;

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
