use crate::models::{CalculatedResult, ChartInfo, ScoreRecord};
use crate::utils::error::{AppError, AppResult};

/// 理论值分数线，达到后单曲潜力值固定为 定数 + 2
pub const PURE_MEMORY_SCORE: i32 = 10_000_000;
/// EX 分数线，中段公式起点
pub const EX_SCORE: i32 = 9_800_000;
/// 低段公式中潜力值等于定数的分数
pub const AA_SCORE: i32 = 9_500_000;
/// 名义上的最高分 (理论值 + 大P)
pub const MAX_NOMINAL_SCORE: i32 = 10_010_000;

/// 分段公式在两处分数线上的跳变量，当前公式在两处都连续
pub const TIER_JUMP: f64 = 0.0;

const SCORE_BASE: f64 = 10_000_000.0;

/// 定数之外的分数加成，低段不做下限截断
pub fn score_modifier(score: i32) -> f64 {
    if score >= PURE_MEMORY_SCORE {
        2.0
    } else if score >= EX_SCORE {
        1.0 + (score as f64 - EX_SCORE as f64) / 200_000.0
    } else {
        (score as f64 - AA_SCORE as f64) / 300_000.0
    }
}

/// 计算单曲潜力值 (play rating)。`constant` 为 ×10 定数。
///
/// * `score >= 10,000,000` → 定数 + 2
/// * `9,800,000 <= score < 10,000,000` → 定数 + 1 + (score - 9,800,000) / 200,000
/// * 其余 → max(定数 + (score - 9,500,000) / 300,000, 0)
pub fn play_rating(score: i32, constant: i32) -> f64 {
    let rating = constant as f64 / 10.0 + score_modifier(score);
    rating.max(0.0)
}

/// 由分数与判定数推出大P数量。
///
/// 判定数据缺失时返回 `Ok(None)`；物量为零时返回错误，不做除零。
pub fn shiny_pure(score: i32, pure: Option<i32>, far: Option<i32>, note: Option<i32>) -> AppResult<Option<i32>> {
    let (pure, far) = match (pure, far) {
        (Some(pure), Some(far)) => (pure, far),
        _ => return Ok(None),
    };
    let note = match note {
        Some(note) if note > 0 => note as f64,
        _ => return Err(AppError::ZeroNoteCount(format!("物量 {note:?}"))),
    };

    let base_score = (pure as f64 * SCORE_BASE / note) + (far as f64 * 0.5 * SCORE_BASE / note);
    let shiny = score as i64 - base_score.floor() as i64;
    i32::try_from(shiny)
        .map(Some)
        .map_err(|_| AppError::ValidationError(format!("大P数超出范围: {shiny}")))
}

/// 对单条成绩套用谱面信息，得到计算结果
pub fn calculate_result(record: &ScoreRecord, chart: &ChartInfo) -> AppResult<CalculatedResult> {
    let shiny_pure = shiny_pure(record.score, record.pure, record.far, chart.note).map_err(|e| match e {
        AppError::ZeroNoteCount(_) => AppError::ZeroNoteCount(format!("{} ({})", chart.song_id, chart.rating_class)),
        other => other,
    })?;
    let potential = play_rating(record.score, chart.constant);

    log::trace!(
        "成绩 #{} {} ({}) score={} -> potential={potential:.4}",
        record.id,
        record.song_id,
        record.rating_class,
        record.score
    );

    Ok(CalculatedResult {
        record: record.clone(),
        shiny_pure,
        potential,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingClass;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pure_memory_tier() {
        assert_abs_diff_eq!(play_rating(10_000_000, 100), 12.0);
        assert_abs_diff_eq!(play_rating(10_001_234, 95), 11.5);
        assert_abs_diff_eq!(play_rating(MAX_NOMINAL_SCORE, 0), 2.0);
    }

    #[test]
    fn test_ex_tier() {
        assert_abs_diff_eq!(play_rating(9_900_000, 90), 10.5, epsilon = 1e-12);
        assert_abs_diff_eq!(play_rating(9_800_000, 90), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(play_rating(9_999_999, 100), 11.999995, epsilon = 1e-9);
    }

    #[test]
    fn test_lower_tier_floors_at_zero() {
        assert_abs_diff_eq!(play_rating(9_500_000, 80), 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(play_rating(9_200_000, 80), 7.0, epsilon = 1e-12);
        assert_eq!(play_rating(0, 10), 0.0);
        assert_eq!(play_rating(0, 0), 0.0);
        assert_eq!(play_rating(5_000_000, 15), 0.0);
    }

    #[test]
    fn test_tier_boundaries_continuous() {
        for constant in [0, 15, 80, 95, 107, 120] {
            let c = constant as f64 / 10.0;

            let lower_at_ex = c + (EX_SCORE - AA_SCORE) as f64 / 300_000.0;
            assert_abs_diff_eq!(play_rating(EX_SCORE, constant) - lower_at_ex, TIER_JUMP, epsilon = 1e-12);
            assert_abs_diff_eq!(play_rating(EX_SCORE, constant), c + 1.0, epsilon = 1e-12);

            let middle_at_pm = c + 1.0 + (PURE_MEMORY_SCORE - EX_SCORE) as f64 / 200_000.0;
            assert_abs_diff_eq!(play_rating(PURE_MEMORY_SCORE, constant) - middle_at_pm, TIER_JUMP, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monotonic_in_score() {
        for constant in [15, 95, 116] {
            let mut last = play_rating(0, constant);
            for score in (0..=MAX_NOMINAL_SCORE).step_by(997) {
                let current = play_rating(score, constant);
                assert!(current >= last, "score {score} rating {current} < {last}");
                last = current;
            }
        }
    }

    #[test]
    fn test_score_modifier_not_floored() {
        assert_abs_diff_eq!(score_modifier(9_200_000), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(score_modifier(9_850_000), 1.25, epsilon = 1e-12);
        assert_eq!(score_modifier(10_005_000), 2.0);
    }

    #[test]
    fn test_shiny_pure() {
        // 1000 物量全 pure，大P 900
        assert_eq!(shiny_pure(10_000_900, Some(1000), Some(0), Some(1000)).unwrap(), Some(900));
        // 2 far: 998 * 10000 + 2 * 5000 = 9,990,000
        assert_eq!(shiny_pure(9_990_850, Some(998), Some(2), Some(1000)).unwrap(), Some(850));
        // 无法整除时向下取整
        assert_eq!(shiny_pure(9_999_900, Some(1399), Some(1), Some(1400)).unwrap(), Some(3472));
    }

    #[test]
    fn test_shiny_pure_missing_judgements() {
        assert_eq!(shiny_pure(9_900_000, None, Some(1), Some(1000)).unwrap(), None);
        assert_eq!(shiny_pure(9_900_000, Some(990), None, Some(1000)).unwrap(), None);
    }

    #[test]
    fn test_shiny_pure_zero_note() {
        assert!(matches!(
            shiny_pure(9_900_000, Some(990), Some(10), Some(0)),
            Err(AppError::ZeroNoteCount(_))
        ));
        assert!(matches!(
            shiny_pure(9_900_000, Some(990), Some(10), None),
            Err(AppError::ZeroNoteCount(_))
        ));
    }

    #[test]
    fn test_corrupt_values_do_not_overflow() {
        assert_eq!(play_rating(i32::MIN, 90), 0.0);
        assert_abs_diff_eq!(play_rating(i32::MAX, 90), 11.0);
        assert!(score_modifier(i32::MIN) < -7000.0);

        assert!(matches!(
            shiny_pure(-10, Some(i32::MAX), Some(0), Some(1)),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(shiny_pure(i32::MIN, Some(0), Some(0), Some(1)).unwrap(), Some(i32::MIN));
    }

    #[test]
    fn test_calculate_result_corrupt_judgements() {
        let mut record = ScoreRecord::new(3, "ignotus", RatingClass::Future, -10);
        record.pure = Some(i32::MAX);
        record.far = Some(0);
        let chart = ChartInfo::new("ignotus", RatingClass::Future, 97, 1);

        assert!(matches!(calculate_result(&record, &chart), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_calculate_result() {
        let mut record = ScoreRecord::new(7, "grievouslady", RatingClass::Future, 9_900_000);
        record.pure = Some(1440);
        record.far = Some(10);
        let chart = ChartInfo::new("grievouslady", RatingClass::Future, 113, 1450);

        let result = calculate_result(&record, &chart).unwrap();
        assert_abs_diff_eq!(result.potential, 11.3 + 1.5, epsilon = 1e-12);
        assert_eq!(result.record, record);
        assert!(result.shiny_pure.is_some());
    }

    #[test]
    fn test_calculate_result_zero_note_names_chart() {
        let mut record = ScoreRecord::new(1, "fracture_ray", RatingClass::Future, 9_900_000);
        record.pure = Some(100);
        record.far = Some(0);
        let chart = ChartInfo::new("fracture_ray", RatingClass::Future, 110, 0);

        let err = calculate_result(&record, &chart).unwrap_err();
        assert!(err.to_string().contains("fracture_ray"));

        // 没有判定数据时不需要物量
        record.pure = None;
        assert!(calculate_result(&record, &chart).is_ok());
    }
}
