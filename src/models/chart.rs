use serde::{Deserialize, Serialize};

use crate::models::score::RatingClass;

/// (歌曲ID, 难度分级)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartKey {
    pub song_id: String,
    pub rating_class: RatingClass,
}

impl ChartKey {
    pub fn new(song_id: impl Into<String>, rating_class: RatingClass) -> Self {
        Self {
            song_id: song_id.into(),
            rating_class,
        }
    }
}

/// 谱面静态信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInfo {
    pub song_id: String,
    pub rating_class: RatingClass,
    /// 定数 ×10，例如 95 表示 9.5
    pub constant: i32,
    /// 物量
    pub note: Option<i32>,
}

impl ChartInfo {
    pub fn new(song_id: impl Into<String>, rating_class: RatingClass, constant: i32, note: i32) -> Self {
        Self {
            song_id: song_id.into(),
            rating_class,
            constant,
            note: Some(note),
        }
    }

    pub fn key(&self) -> ChartKey {
        ChartKey::new(self.song_id.clone(), self.rating_class)
    }

    /// 实际定数
    pub fn constant_value(&self) -> f64 {
        self.constant as f64 / 10.0
    }
}
