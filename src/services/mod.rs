pub mod rating;
pub mod score_db;
pub mod source;
