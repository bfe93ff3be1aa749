//! 分数、定数与单曲潜力值之间的换算。
//!
//! 正向公式见 [`crate::utils::potential`]；这里提供反向查询，例如
//! "这张谱面要打多少分才能拿到 12.00"。

use crate::models::{ConstantsFromPlayRating, ScoreRange};
use crate::utils::error::{AppError, AppResult};
use crate::utils::potential::{self, AA_SCORE, EX_SCORE, MAX_NOMINAL_SCORE, PURE_MEMORY_SCORE};

pub use crate::utils::potential::{play_rating, score_modifier};

/// 比较单曲潜力值时的容差
const RATING_EPSILON: f64 = 1e-9;
/// 反解分数时吸收浮点误差的容差
const SCORE_TOLERANCE: f64 = 1e-6;

// (上限, 下限)，依次为 EX+ / EX / AA / A / B / C
const GRADE_BANDS: [(i32, i32); 6] = [
    (10_000_000, 9_900_000),
    (9_899_999, 9_800_000),
    (9_799_999, 9_500_000),
    (9_499_999, 9_200_000),
    (9_199_999, 8_900_000),
    (8_899_999, 8_600_000),
];

#[derive(Debug, Clone, Copy)]
enum Tier {
    Lower,
    Middle,
    Top,
}

impl Tier {
    const ALL: [Tier; 3] = [Tier::Lower, Tier::Middle, Tier::Top];

    /// 在该分段内反解分数，结果不在该分段定义域内时返回 None
    fn invert(self, modifier: f64) -> Option<f64> {
        match self {
            Tier::Lower => {
                let score = AA_SCORE as f64 + modifier * 300_000.0;
                (score >= -SCORE_TOLERANCE && score <= EX_SCORE as f64 + SCORE_TOLERANCE).then_some(score)
            }
            Tier::Middle => {
                let score = EX_SCORE as f64 + (modifier - 1.0) * 200_000.0;
                (score >= EX_SCORE as f64 - SCORE_TOLERANCE && score < PURE_MEMORY_SCORE as f64).then_some(score)
            }
            Tier::Top => ((modifier - 2.0).abs() <= RATING_EPSILON).then_some(PURE_MEMORY_SCORE as f64),
        }
    }
}

fn invert_modifier(modifier: f64) -> Option<f64> {
    Tier::ALL.iter().find_map(|tier| tier.invert(modifier))
}

fn check_rating(rating: f64) -> AppResult<()> {
    if !rating.is_finite() || rating < 0.0 {
        return Err(AppError::ValidationError(format!("无效的单曲潜力值: {rating}")));
    }
    Ok(())
}

/// 达到目标单曲潜力值所需的最低分数
pub fn score_for_play_rating(rating: f64, constant: i32) -> AppResult<i32> {
    check_rating(rating)?;
    let base = constant as f64 / 10.0;

    if rating > base + 2.0 + RATING_EPSILON {
        return Err(AppError::InvalidScoreDomain(format!(
            "定数 {base:.1} 的单曲潜力值上限为 {:.4}，无法达到 {rating:.4}",
            base + 2.0
        )));
    }
    if rating <= play_rating(0, constant) + RATING_EPSILON {
        return Ok(0);
    }

    let score = invert_modifier(rating - base).ok_or_else(|| {
        AppError::InvalidScoreDomain(format!("定数 {base:.1} 下没有分段能得到 {rating:.4}"))
    })?;

    Ok((score - SCORE_TOLERANCE).ceil() as i32)
}

/// 单曲潜力值不超过目标值的最高分数
fn max_score_at_most(rating: f64, constant: i32) -> AppResult<i32> {
    let base = constant as f64 / 10.0;
    if rating >= base + 2.0 - RATING_EPSILON {
        return Ok(MAX_NOMINAL_SCORE);
    }

    // 目标为 0 时，取未截断公式恰好为 0 的位置
    let modifier = if rating <= RATING_EPSILON { -base } else { rating - base };
    let score = invert_modifier(modifier).ok_or_else(|| {
        AppError::InvalidScoreDomain(format!("定数 {base:.1} 下没有分数的单曲潜力值为 {rating:.4}"))
    })?;

    Ok((score + SCORE_TOLERANCE).floor() as i32)
}

/// 单曲潜力值恰好为 `rating` 的全部整数分数。
///
/// 理论值分段返回 `[10,000,000, 10,010,000]`；目标值落在两个相邻整数分数之间时
/// 返回 [`AppError::InvalidScoreDomain`]。
pub fn score_range(rating: f64, constant: i32) -> AppResult<ScoreRange> {
    let min = score_for_play_rating(rating, constant)?;
    let max = max_score_at_most(rating, constant)?;

    if min > max {
        return Err(AppError::InvalidScoreDomain(format!(
            "没有整数分数的单曲潜力值恰好为 {rating} (定数 {constant})"
        )));
    }

    Ok(ScoreRange { min, max })
}

/// 由判定数推出的分数区间，大P每个额外加 1 分
pub fn score_range_from_judgements(note: i32, pure: i32, far: i32) -> AppResult<ScoreRange> {
    if note <= 0 {
        return Err(AppError::ZeroNoteCount(format!("物量 {note}")));
    }

    let single_note_score = 10_000_000.0 / note as f64;
    let actual_score = (single_note_score * pure as f64 + single_note_score * 0.5 * far as f64).floor() as i32;

    let max = actual_score
        .checked_add(pure)
        .ok_or_else(|| AppError::ValidationError(format!("判定数超出范围: pure={pure} far={far}")))?;

    Ok(ScoreRange { min: actual_score, max })
}

pub fn calculate_shiny_pure(note: i32, score: i32, pure: i32, far: i32) -> AppResult<i32> {
    potential::shiny_pure(score, Some(pure), Some(far), Some(note))?
        .ok_or_else(|| AppError::ValidationError("缺少判定数据".to_string()))
}

/// 在各评级分数段内，得到目标单曲潜力值所需的定数区间
pub fn constants_from_play_rating(rating: f64) -> AppResult<ConstantsFromPlayRating> {
    check_rating(rating)?;

    let ranges: Vec<(f64, f64)> = GRADE_BANDS
        .iter()
        .map(|&(upper, lower)| (rating - score_modifier(upper), rating - score_modifier(lower)))
        .collect();

    Ok(ConstantsFromPlayRating {
        ex_plus: ranges[0],
        ex: ranges[1],
        aa: ranges[2],
        a: ranges[3],
        b: ranges[4],
        c: ranges[5],
    })
}
