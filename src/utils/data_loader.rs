use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

use crate::models::{ChartInfo, ScoreRecord};
use crate::utils::error::AppResult;

fn load_rows<T, R>(mut rdr: csv::Reader<R>, name: &str) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + std::fmt::Debug,
    R: Read,
{
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize::<T>().enumerate() {
        let line_num = index + 2; // +1 for header, +1 for 1-based index
        match result {
            Ok(record) => {
                log::trace!("成功解析 {name} 第 {line_num} 行: {record:?}");
                rows.push(record);
            }
            Err(e) => {
                log::error!("解析 {name} 第 {line_num} 行失败: {e}");
                return Err(e.into());
            }
        }
    }

    log::debug!("{name} 加载完成，共 {} 条", rows.len());
    Ok(rows)
}

// 加载成绩记录
pub fn load_scores(path: &Path) -> AppResult<Vec<ScoreRecord>> {
    log::debug!("正在加载成绩记录，路径: {}", path.display());
    load_rows(csv::Reader::from_path(path)?, "成绩记录")
}

pub fn load_scores_from_reader<R: Read>(reader: R) -> AppResult<Vec<ScoreRecord>> {
    load_rows(csv::Reader::from_reader(reader), "成绩记录")
}

// 加载谱面信息
pub fn load_chart_infos(path: &Path) -> AppResult<Vec<ChartInfo>> {
    log::debug!("正在加载谱面信息，路径: {}", path.display());
    load_rows(csv::Reader::from_path(path)?, "谱面信息")
}

pub fn load_chart_infos_from_reader<R: Read>(reader: R) -> AppResult<Vec<ChartInfo>> {
    load_rows(csv::Reader::from_reader(reader), "谱面信息")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClearType, RatingClass};

    #[test]
    fn test_load_scores_from_reader() {
        let data = "\
id,song_id,rating_class,score,pure,far,lost,date,max_recall,r10_clear_type
1,tempestissimo,3,9912345,1530,10,0,1700000000,1540,1
2,grievouslady,2,9500000,,,,,,
";
        let scores = load_scores_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scores.len(), 2);

        assert_eq!(scores[0].rating_class, RatingClass::Beyond);
        assert_eq!(scores[0].pure, Some(1530));
        assert_eq!(scores[0].clear_type, Some(ClearType::Complete));
        assert_eq!(scores[0].date, Some(1_700_000_000));

        assert_eq!(scores[1].rating_class, RatingClass::Future);
        assert_eq!(scores[1].pure, None);
        assert_eq!(scores[1].clear_type, None);
    }

    #[test]
    fn test_load_chart_infos_from_reader() {
        let data = "\
song_id,rating_class,constant,note
tempestissimo,3,115,1540
grievouslady,2,113,1450
";
        let charts = load_chart_infos_from_reader(data.as_bytes()).unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0], ChartInfo::new("tempestissimo", RatingClass::Beyond, 115, 1540));
    }

    #[test]
    fn test_load_scores_invalid_rating_class() {
        let data = "\
id,song_id,rating_class,score,pure,far,lost,date,max_recall,r10_clear_type
1,tempestissimo,9,9912345,,,,,,
";
        assert!(load_scores_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_scores(Path::new("/nonexistent/scores.csv")).is_err());
    }
}
