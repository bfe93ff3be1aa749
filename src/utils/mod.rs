pub mod b30;
pub mod data_loader;
pub mod error;
pub mod potential;
pub mod score;
pub mod world_step;
