use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use std::fmt;

/// 谱面难度分级
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RatingClass {
    Past = 0,
    Present = 1,
    Future = 2,
    Beyond = 3,
    Eternal = 4,
}

impl RatingClass {
    /// 游戏内显示用的三字母缩写
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RatingClass::Past => "PST",
            RatingClass::Present => "PRS",
            RatingClass::Future => "FTR",
            RatingClass::Beyond => "BYD",
            RatingClass::Eternal => "ETR",
        }
    }
}

impl TryFrom<i32> for RatingClass {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(RatingClass::Past),
            1 => Ok(RatingClass::Present),
            2 => Ok(RatingClass::Future),
            3 => Ok(RatingClass::Beyond),
            4 => Ok(RatingClass::Eternal),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

// 0: LOST, 1: COMPLETE, 2: HARD_LOST
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClearType {
    Lost = 0,
    Complete = 1,
    HardLost = 2,
}

impl TryFrom<i32> for ClearType {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ClearType::Lost),
            1 => Ok(ClearType::Complete),
            2 => Ok(ClearType::HardLost),
            _ => Err(()),
        }
    }
}

/// 单次游玩记录，由外部数据源提供，计算过程中只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: i64,
    pub song_id: String,
    pub rating_class: RatingClass,
    pub score: i32,
    /// 旧记录可能没有判定数据
    pub pure: Option<i32>,
    pub far: Option<i32>,
    pub lost: Option<i32>,
    /// Unix 时间戳 (秒)
    pub date: Option<i64>,
    pub max_recall: Option<i32>,
    #[serde(alias = "r10_clear_type")]
    pub clear_type: Option<ClearType>,
}

impl ScoreRecord {
    /// 只含必需字段的记录，其余字段为空
    pub fn new(id: i64, song_id: impl Into<String>, rating_class: RatingClass, score: i32) -> Self {
        Self {
            id,
            song_id: song_id.into(),
            rating_class,
            score,
            pure: None,
            far: None,
            lost: None,
            date: None,
            max_recall: None,
            clear_type: None,
        }
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.date.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}
