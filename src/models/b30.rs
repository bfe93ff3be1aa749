use serde::{Deserialize, Serialize};

use crate::models::chart::ChartKey;
use crate::models::score::ScoreRecord;

/// 带计算结果的单条成绩，字段与原记录一致并追加大P数与单曲潜力值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedResult {
    #[serde(flatten)]
    pub record: ScoreRecord,
    /// 缺少判定数据时为空
    pub shiny_pure: Option<i32>,
    pub potential: f64,
}

impl CalculatedResult {
    pub fn chart_key(&self) -> ChartKey {
        ChartKey::new(self.record.song_id.clone(), self.record.rating_class)
    }
}

/// 每张谱面潜力值最高的那条成绩
pub type BestResult = CalculatedResult;

/// 同一谱面多条成绩潜力值完全相同时保留哪一条
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// 按输入顺序先出现的
    #[default]
    FirstSeen,
    /// 游玩时间最新的，时间相同或缺失时退回先出现的
    MostRecent,
}

// B30计算结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct B30Result {
    pub b30: f64,
    /// 参与计算的成绩，按潜力值降序
    pub records: Vec<BestResult>,
    /// 宽松模式下被排除的记录数
    #[serde(default)]
    pub skipped: usize,
}

/// 截断前吸收浮点误差，避免 10.199999... 显示成 10.19
const DISPLAY_EPSILON: f64 = 1e-9;

impl B30Result {
    /// 游戏内显示的两位小数 (截断)
    pub fn rounded_b30(&self) -> f64 {
        ((self.b30 * 100.0) + DISPLAY_EPSILON).floor() / 100.0
    }
}
