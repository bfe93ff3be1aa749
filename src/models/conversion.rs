use serde::{Deserialize, Serialize};

/// 闭区间分数范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub fn contains(&self, score: i32) -> bool {
        self.min <= score && score <= self.max
    }
}

/// 某一评级分数段内达成目标单曲潜力值所需的定数区间 (实际定数，非 ×10)
pub type ConstantRange = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantsFromPlayRating {
    /// 9,900,000 ~ 10,000,000
    pub ex_plus: ConstantRange,
    /// 9,800,000 ~ 9,899,999
    pub ex: ConstantRange,
    /// 9,500,000 ~ 9,799,999
    pub aa: ConstantRange,
    /// 9,200,000 ~ 9,499,999
    pub a: ConstantRange,
    /// 8,900,000 ~ 9,199,999
    pub b: ConstantRange,
    /// 8,600,000 ~ 8,899,999
    pub c: ConstantRange,
}
