use serde::{Deserialize, Serialize};

/// 世界模式步数公式版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepFormula {
    /// 未经舍入的原始公式
    Original,
    /// 游戏内显示值，保留一位小数
    #[default]
    Current,
}

/// 搭档技能对步数的加成
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartnerBonus {
    pub step_bonus: f64,
    pub final_multiplier: f64,
}

impl Default for PartnerBonus {
    fn default() -> Self {
        Self {
            step_bonus: 0.0,
            final_multiplier: 1.0,
        }
    }
}

impl PartnerBonus {
    /// 摩耶: 最终步数翻倍
    pub fn maya() -> Self {
        Self {
            final_multiplier: 2.0,
            ..Default::default()
        }
    }

    /// 光 & 对立 (Mithra Tercera): 固定额外步数
    pub fn mithra_tercera(step_bonus: f64) -> Self {
        Self {
            step_bonus,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    /// 搭档 STEP 属性
    pub partner_step: f64,
    pub partner_bonus: PartnerBonus,
    /// 残片加速倍率，无加速为 1.0
    pub step_booster: f64,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            partner_step: 50.0,
            partner_bonus: PartnerBonus::default(),
            step_booster: 1.0,
        }
    }
}
