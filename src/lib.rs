//! Arcaea 潜力值 (b30) 计算。
//!
//! 数据流: 成绩记录 + 谱面信息 → 单曲潜力值 → 每谱面最佳 → Best 30 平均。
//! 分数/定数/潜力值的反向换算与世界模式步数换算为独立的纯函数。

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use services::rating::{calculate_b30, get_b30_calculated_list, RatingService};
pub use services::source::{CsvSource, MemorySource, RecordSource};
pub use utils::error::{AppError, AppResult};
