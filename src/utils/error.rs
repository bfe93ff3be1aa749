use thiserror::Error;

use crate::models::RatingClass;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("找不到谱面信息: {song_id} ({rating_class})")]
    MissingChartInfo {
        song_id: String,
        rating_class: RatingClass,
    },

    #[error("谱面物量为零或缺失: {0}")]
    ZeroNoteCount(String),

    #[error("分数超出有效区间: {0}")]
    InvalidScoreDomain(String),

    #[error("没有可用于计算的最佳成绩")]
    EmptyAggregation,

    #[error("验证错误: {0}")]
    ValidationError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serde JSON错误: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl AppError {
    /// 宽松模式下可以跳过的单条记录错误
    pub fn is_record_local(&self) -> bool {
        matches!(
            self,
            AppError::MissingChartInfo { .. } | AppError::ZeroNoteCount(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
