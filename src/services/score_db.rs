use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::convert::TryFrom;

use crate::models::{ChartInfo, ClearType, RatingClass, ScoreRecord};
use crate::services::source::MemorySource;
use crate::utils::error::{AppError, AppResult};

const SCORE_QUERY: &str =
    "SELECT id, song_id, rating_class, score, pure, far, lost, date, max_recall, r10_clear_type FROM score ORDER BY id";
const CHART_INFO_QUERY: &str = "SELECT song_id, rating_class, constant, note FROM charts_info";

fn rating_class(value: i32) -> AppResult<RatingClass> {
    RatingClass::try_from(value).map_err(|_| AppError::ValidationError(format!("未知的难度分级: {value}")))
}

/// 从已有的 arcaea-offline 数据库只读加载成绩与谱面信息
#[derive(Clone)]
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> AppResult<Self> {
        log::info!("Connecting to database: {database_url}");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn fetch_scores(&self) -> AppResult<Vec<ScoreRecord>> {
        let rows = sqlx::query(SCORE_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("查询成绩失败: {e}")))?;

        let mut scores = Vec::with_capacity(rows.len());
        for row in rows {
            let clear_type = match row.try_get::<Option<i32>, _>("r10_clear_type")? {
                Some(v) => Some(
                    ClearType::try_from(v)
                        .map_err(|_| AppError::ValidationError(format!("未知的通关类型: {v}")))?,
                ),
                None => None,
            };

            scores.push(ScoreRecord {
                id: row.try_get("id")?,
                song_id: row.try_get("song_id")?,
                rating_class: rating_class(row.try_get("rating_class")?)?,
                score: row.try_get("score")?,
                pure: row.try_get("pure")?,
                far: row.try_get("far")?,
                lost: row.try_get("lost")?,
                date: row.try_get("date")?,
                max_recall: row.try_get("max_recall")?,
                clear_type,
            });
        }

        log::debug!("从数据库读取 {} 条成绩", scores.len());
        Ok(scores)
    }

    pub async fn fetch_chart_infos(&self) -> AppResult<Vec<ChartInfo>> {
        let rows = sqlx::query(CHART_INFO_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("查询谱面信息失败: {e}")))?;

        let mut charts = Vec::with_capacity(rows.len());
        for row in rows {
            charts.push(ChartInfo {
                song_id: row.try_get("song_id")?,
                rating_class: rating_class(row.try_get("rating_class")?)?,
                constant: row.try_get("constant")?,
                note: row.try_get("note")?,
            });
        }

        log::debug!("从数据库读取 {} 条谱面信息", charts.len());
        Ok(charts)
    }

    /// 一次性读取全部数据，供同步计算使用
    pub async fn load(&self) -> AppResult<MemorySource> {
        let scores = self.fetch_scores().await?;
        let chart_infos = self.fetch_chart_infos().await?;
        Ok(MemorySource::new(scores, chart_infos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rating::RatingService;
    use crate::config::AppConfig;
    use approx::assert_abs_diff_eq;

    async fn setup() -> SqliteSource {
        let source = SqliteSource::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // 测试用表结构，与 arcaea-offline 的列名一致
        sqlx::query(
            r#"
            CREATE TABLE score (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                song_id TEXT NOT NULL,
                rating_class INTEGER NOT NULL,
                score INTEGER NOT NULL,
                pure INTEGER,
                far INTEGER,
                lost INTEGER,
                date INTEGER,
                max_recall INTEGER,
                r10_clear_type INTEGER
            )
            "#,
        )
        .execute(&source.pool)
        .await
        .expect("Failed to create score table");

        sqlx::query(
            r#"
            CREATE TABLE charts_info (
                song_id TEXT NOT NULL,
                rating_class INTEGER NOT NULL,
                constant INTEGER NOT NULL,
                note INTEGER
            )
            "#,
        )
        .execute(&source.pool)
        .await
        .expect("Failed to create charts_info table");

        source
    }

    #[tokio::test]
    async fn test_load_from_database() {
        let source = setup().await;

        sqlx::query(
            "INSERT INTO score (song_id, rating_class, score, pure, far, lost, date, max_recall, r10_clear_type)
             VALUES ('tempestissimo', 3, 9900000, 1500, 30, 10, 1700000000, 800, 1),
                    ('tempestissimo', 3, 9700000, NULL, NULL, NULL, NULL, NULL, NULL)",
        )
        .execute(&source.pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO charts_info VALUES ('tempestissimo', 3, 115, 1540)")
            .execute(&source.pool)
            .await
            .unwrap();

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.scores.len(), 2);
        assert_eq!(snapshot.scores[0].rating_class, RatingClass::Beyond);
        assert_eq!(snapshot.scores[0].clear_type, Some(ClearType::Complete));
        assert_eq!(snapshot.scores[1].pure, None);
        assert_eq!(snapshot.chart_infos.len(), 1);
        assert_eq!(snapshot.chart_infos[0].note, Some(1540));

        let result = RatingService::new(AppConfig::default()).run(&snapshot).unwrap();
        assert_abs_diff_eq!(result.b30, 11.5 + 1.5, epsilon = 1e-9);
        assert_eq!(result.records.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_rating_class() {
        let source = setup().await;
        sqlx::query("INSERT INTO score (song_id, rating_class, score) VALUES ('x', 8, 1)")
            .execute(&source.pool)
            .await
            .unwrap();

        assert!(matches!(
            source.fetch_scores().await,
            Err(AppError::ValidationError(_))
        ));
    }
}
