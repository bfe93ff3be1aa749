use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{B30Result, BestResult, CalculatedResult, ChartKey, TieBreak};
use crate::utils::error::{AppError, AppResult};

/// 默认取前 30 张谱面
pub const DEFAULT_BEST_N: usize = 30;

/// 按潜力值降序排序，稳定排序保证相同潜力值保持原有顺序
pub fn sort_by_potential(records: &mut [BestResult]) {
    records.sort_by(|a, b| b.potential.partial_cmp(&a.potential).unwrap_or(Ordering::Equal));
}

fn should_replace(current: &BestResult, candidate: &CalculatedResult, tie_break: TieBreak) -> bool {
    match candidate.potential.partial_cmp(&current.potential) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => match tie_break {
            TieBreak::FirstSeen => false,
            TieBreak::MostRecent => candidate.record.date > current.record.date,
        },
        _ => false,
    }
}

/// 每张谱面 (歌曲ID + 难度) 只保留潜力值最高的一条成绩。
///
/// 潜力值完全相同时按 `tie_break` 决定，默认保留输入中先出现的那条。
/// 结果按潜力值降序排列。
pub fn select_best(calculated: &[CalculatedResult], tie_break: TieBreak) -> Vec<BestResult> {
    let mut index: HashMap<ChartKey, usize> = HashMap::new();
    let mut best: Vec<BestResult> = Vec::new();

    for result in calculated {
        let key = result.chart_key();
        match index.get(&key) {
            Some(&i) => {
                if should_replace(&best[i], result, tie_break) {
                    best[i] = result.clone();
                }
            }
            None => {
                index.insert(key, best.len());
                best.push(result.clone());
            }
        }
    }

    sort_by_potential(&mut best);
    log::debug!("[B30] 共 {} 条成绩，去重后 {} 张谱面", calculated.len(), best.len());
    best
}

/// 取潜力值最高的 `n` 张谱面求平均。不足 `n` 张时按实际数量平均。
pub fn aggregate_top_n(best: &[BestResult], n: usize) -> AppResult<B30Result> {
    if n == 0 {
        return Err(AppError::ValidationError("参与计算的谱面数必须大于0".to_string()));
    }
    if best.is_empty() {
        log::debug!("[B30] 无最佳成绩，无法计算");
        return Err(AppError::EmptyAggregation);
    }

    let mut records = best.to_vec();
    sort_by_potential(&mut records);
    records.truncate(n);

    let sum: f64 = records.iter().map(|r| r.potential).sum();
    let b30 = sum / records.len() as f64;
    log::debug!("[B30] Best {n} 计算: 使用了 {} 张谱面，总和 = {sum:.4}，结果 = {b30:.4}", records.len());

    Ok(B30Result {
        b30,
        records,
        skipped: 0,
    })
}
