use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::paginator::PageSettings;
use crate::post_list::PostList;
use crate::post_processor::{BatchPolicy, PostProcessor};
use crate::text_utils::DEFAULT_DATE_FORMAT;

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub date_format: String,
    pub batch_policy: BatchPolicy,
    pub cache_enabled: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            batch_policy: BatchPolicy::default(),
            cache_enabled: false,
        }
    }
}

#[derive(Deserialize)]
pub struct Site {
    pub url: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub pagination: PageSettings,
    #[serde(default)]
    pub defaults: Defaults,
    pub site: Option<Site>,
    pub log: Option<Log>,
}

impl Config {
    pub fn post_list(&self) -> PostList {
        PostList::new(self.paths.posts_dir.clone()).with_date_format(&self.defaults.date_format)
    }

    pub fn post_processor(&self) -> PostProcessor {
        PostProcessor::new(self.post_list(), self.pagination)
            .with_batch_policy(self.defaults.batch_policy)
            .with_cache(self.defaults.cache_enabled)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe
        .parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.pagination.post_per_page == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "pagination.post_per_page has to be greater than 0"));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;
    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
        out_dir: parse_path(cfg.paths.out_dir)?,
    };

    Ok(cfg)
}
