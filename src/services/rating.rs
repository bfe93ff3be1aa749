use rayon::prelude::*;
use std::collections::HashMap;

use crate::config::{AppConfig, CONFIG};
use crate::models::{B30Result, BestResult, CalculatedResult, ChartInfo, ChartKey, ScoreRecord};
use crate::services::source::RecordSource;
use crate::utils::b30::{aggregate_top_n, select_best};
use crate::utils::error::{AppError, AppResult};
use crate::utils::potential::calculate_result;

// 潜力值计算服务: 成绩 -> 单曲潜力值 -> 每谱面最佳 -> Best N 平均
#[derive(Debug, Clone)]
pub struct RatingService {
    config: AppConfig,
}

impl RatingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 使用全局配置
    pub fn from_global() -> Self {
        Self::new((**CONFIG).clone())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn chart_map<'a>(&self, charts: &'a [ChartInfo]) -> HashMap<ChartKey, &'a ChartInfo> {
        let mut map = HashMap::with_capacity(charts.len());
        for chart in charts {
            let key = chart.key();
            if map.contains_key(&key) {
                log::warn!("重复的谱面信息 {} ({})，保留先出现的一条", chart.song_id, chart.rating_class);
                continue;
            }
            map.insert(key, chart);
        }
        map
    }

    /// 为每条成绩计算大P数与单曲潜力值，返回结果与被跳过的记录数。
    ///
    /// 严格模式下遇到第一条 (按输入顺序) 出错的记录即返回该错误。
    pub fn calculate_with_skipped(
        &self,
        scores: &[ScoreRecord],
        charts: &[ChartInfo],
    ) -> AppResult<(Vec<CalculatedResult>, usize)> {
        let chart_map = self.chart_map(charts);

        let outcomes: Vec<AppResult<CalculatedResult>> = scores
            .par_iter()
            .map(|record| {
                let key = ChartKey::new(record.song_id.clone(), record.rating_class);
                let chart = chart_map.get(&key).ok_or_else(|| AppError::MissingChartInfo {
                    song_id: record.song_id.clone(),
                    rating_class: record.rating_class,
                })?;
                calculate_result(record, chart)
            })
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        let mut skipped = 0;
        for (record, outcome) in scores.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) if self.config.lenient && e.is_record_local() => {
                    log::warn!("跳过成绩 #{}: {e}", record.id);
                    skipped += 1;
                }
                Err(e) => {
                    log::error!("计算成绩 #{} 失败: {e}", record.id);
                    return Err(e);
                }
            }
        }

        log::debug!("单曲潜力值计算完成: {} 条成功，{skipped} 条跳过", results.len());
        Ok((results, skipped))
    }

    pub fn calculate(&self, scores: &[ScoreRecord], charts: &[ChartInfo]) -> AppResult<Vec<CalculatedResult>> {
        self.calculate_with_skipped(scores, charts).map(|(results, _)| results)
    }

    pub fn best(&self, calculated: &[CalculatedResult]) -> Vec<BestResult> {
        select_best(calculated, self.config.tie_break)
    }

    pub fn b30(&self, best: &[BestResult]) -> AppResult<f64> {
        aggregate_top_n(best, self.config.best_n).map(|result| result.b30)
    }

    /// 参与 b30 计算的谱面，按潜力值降序
    pub fn b30_calculated_list(&self, best: &[BestResult]) -> AppResult<Vec<BestResult>> {
        aggregate_top_n(best, self.config.best_n).map(|result| result.records)
    }

    /// 从数据源读取一次并完成整条计算
    pub fn run(&self, source: &dyn RecordSource) -> AppResult<B30Result> {
        let scores = source.scores()?;
        let charts = source.chart_infos()?;
        log::debug!("开始计算: {} 条成绩，{} 条谱面信息", scores.len(), charts.len());

        let (calculated, skipped) = self.calculate_with_skipped(&scores, &charts)?;
        let best = self.best(&calculated);
        let mut result = aggregate_top_n(&best, self.config.best_n)?;
        result.skipped = skipped;

        log::info!(
            "b30 计算完成: {:.4} (显示 {:.2})，使用 {} 张谱面",
            result.b30,
            result.rounded_b30(),
            result.records.len()
        );
        Ok(result)
    }
}

pub fn calculate_b30(source: &dyn RecordSource) -> AppResult<f64> {
    RatingService::from_global().run(source).map(|result| result.b30)
}

pub fn get_b30_calculated_list(source: &dyn RecordSource) -> AppResult<Vec<BestResult>> {
    RatingService::from_global().run(source).map(|result| result.records)
}
