use std::path::PathBuf;

use crate::config::AppConfig;
use crate::models::{ChartInfo, ScoreRecord};
use crate::utils::data_loader::{load_chart_infos, load_scores};
use crate::utils::error::AppResult;

/// 成绩与谱面信息的只读数据源，一次计算只读取一次
pub trait RecordSource {
    fn scores(&self) -> AppResult<Vec<ScoreRecord>>;
    fn chart_infos(&self) -> AppResult<Vec<ChartInfo>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub scores: Vec<ScoreRecord>,
    pub chart_infos: Vec<ChartInfo>,
}

impl MemorySource {
    pub fn new(scores: Vec<ScoreRecord>, chart_infos: Vec<ChartInfo>) -> Self {
        Self { scores, chart_infos }
    }
}

impl RecordSource for MemorySource {
    fn scores(&self) -> AppResult<Vec<ScoreRecord>> {
        Ok(self.scores.clone())
    }

    fn chart_infos(&self) -> AppResult<Vec<ChartInfo>> {
        Ok(self.chart_infos.clone())
    }
}

/// 从两个 CSV 文件读取
#[derive(Debug, Clone)]
pub struct CsvSource {
    score_path: PathBuf,
    chart_path: PathBuf,
}

impl CsvSource {
    pub fn new(score_path: impl Into<PathBuf>, chart_path: impl Into<PathBuf>) -> Self {
        Self {
            score_path: score_path.into(),
            chart_path: chart_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.score_file_path(), config.chart_file_path())
    }
}

impl RecordSource for CsvSource {
    fn scores(&self) -> AppResult<Vec<ScoreRecord>> {
        let scores = load_scores(&self.score_path)?;
        log::info!("已加载 {} 条成绩记录", scores.len());
        Ok(scores)
    }

    fn chart_infos(&self) -> AppResult<Vec<ChartInfo>> {
        let charts = load_chart_infos(&self.chart_path)?;
        log::info!("已加载 {} 条谱面信息", charts.len());
        Ok(charts)
    }
}
