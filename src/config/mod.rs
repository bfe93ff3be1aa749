use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::TieBreak;
use crate::utils::b30::DEFAULT_BEST_N;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 参与平均的谱面数
    pub best_n: usize,
    /// 宽松模式：跳过缺少谱面信息的记录而不是整体失败
    pub lenient: bool,
    pub tie_break: TieBreak,
    pub log_level: String,
    pub data_path: String,
    pub score_file: String,
    pub chart_file: String,
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            best_n: DEFAULT_BEST_N,
            lenient: false,
            tie_break: TieBreak::FirstSeen,
            log_level: "info".to_string(),
            data_path: "info".to_string(),
            score_file: "scores.csv".to_string(),
            chart_file: "chart_info.csv".to_string(),
            database_url: "sqlite:arcaea_offline.db".to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_tie_break(value: &str) -> Option<TieBreak> {
    match value.trim().to_lowercase().as_str() {
        "first_seen" => Some(TieBreak::FirstSeen),
        "most_recent" => Some(TieBreak::MostRecent),
        _ => None,
    }
}

impl AppConfig {
    /// 读取 `.env` 与环境变量，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Ok(value) = env::var("B30_COUNT") {
            config.best_n = value
                .trim()
                .parse()
                .map_err(|e| AppError::ConfigError(format!("B30_COUNT 解析失败: {e}")))?;
        }
        if let Ok(value) = env::var("RATING_LENIENT") {
            config.lenient = parse_bool(&value)
                .ok_or_else(|| AppError::ConfigError(format!("RATING_LENIENT 取值无效: {value}")))?;
        }
        if let Ok(value) = env::var("RATING_TIE_BREAK") {
            config.tie_break = parse_tie_break(&value)
                .ok_or_else(|| AppError::ConfigError(format!("RATING_TIE_BREAK 取值无效: {value}")))?;
        }
        if let Ok(value) = env::var("RUST_LOG") {
            config.log_level = value;
        }
        if let Ok(value) = env::var("INFO_DATA_PATH") {
            config.data_path = value;
        }
        if let Ok(value) = env::var("SCORE_FILE") {
            config.score_file = value;
        }
        if let Ok(value) = env::var("CHART_INFO_FILE") {
            config.chart_file = value;
        }
        if let Ok(value) = env::var("DATABASE_URL") {
            config.database_url = value;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| AppError::ConfigError(format!("无法打开配置文件: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AppError::ConfigError(format!("读取配置文件失败: {e}")))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| AppError::ConfigError(format!("解析配置文件失败: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.best_n == 0 {
            return Err(AppError::ConfigError("best_n 必须大于0".to_string()));
        }
        Ok(())
    }

    pub fn score_file_path(&self) -> PathBuf {
        Path::new(&self.data_path).join(&self.score_file)
    }

    pub fn chart_file_path(&self) -> PathBuf {
        Path::new(&self.data_path).join(&self.chart_file)
    }

    /// 初始化 env_logger，`RUST_LOG` 优先于配置中的级别。重复调用不会报错。
    pub fn init_logger(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        if env_logger::Builder::from_env(env).try_init().is_err() {
            log::debug!("日志已初始化，跳过");
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Arc<AppConfig> = Arc::new(AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("加载配置失败，使用默认配置: {e}");
        AppConfig::default()
    }));
}
