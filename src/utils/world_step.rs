use crate::models::{StepFormula, StepParams};
use crate::utils::error::{AppError, AppResult};

/// 单曲潜力值为 0 时、标准搭档的基础步数
const BASE_STEP: f64 = 2.5;
const RATING_FACTOR: f64 = 2.45;
const STANDARD_PARTNER_STEP: f64 = 50.0;

fn check_params(params: &StepParams) -> AppResult<()> {
    if params.partner_step <= 0.0 || params.step_booster <= 0.0 || params.partner_bonus.final_multiplier <= 0.0 {
        return Err(AppError::ValidationError(format!("无效的步数参数: {params:?}")));
    }
    Ok(())
}

fn step_original(play_rating: f64, params: &StepParams) -> f64 {
    let rating_factor = BASE_STEP + RATING_FACTOR * play_rating.max(0.0).sqrt();
    let step = rating_factor * (params.partner_step / STANDARD_PARTNER_STEP) + params.partner_bonus.step_bonus;
    step * params.step_booster * params.partner_bonus.final_multiplier
}

/// 由单曲潜力值计算世界模式步数，公式版本由调用方指定
pub fn calculate_step(play_rating: f64, formula: StepFormula, params: &StepParams) -> AppResult<f64> {
    check_params(params)?;
    if !play_rating.is_finite() {
        return Err(AppError::ValidationError(format!("无效的单曲潜力值: {play_rating}")));
    }

    let step = step_original(play_rating, params);
    Ok(match formula {
        StepFormula::Original => step,
        StepFormula::Current => (step * 10.0).round() / 10.0,
    })
}

/// 由步数反推单曲潜力值 (按未舍入公式)
pub fn calculate_play_rating_from_step(step: f64, params: &StepParams) -> AppResult<f64> {
    check_params(params)?;

    let base_step = step / (params.step_booster * params.partner_bonus.final_multiplier) - params.partner_bonus.step_bonus;
    let rating_factor = base_step / (params.partner_step / STANDARD_PARTNER_STEP);

    if !rating_factor.is_finite() || rating_factor < BASE_STEP - 1e-9 {
        return Err(AppError::InvalidScoreDomain(format!(
            "步数 {step} 低于单曲潜力值为 0 时的步数"
        )));
    }

    let root = ((rating_factor - BASE_STEP) / RATING_FACTOR).max(0.0);
    Ok(root * root)
}
