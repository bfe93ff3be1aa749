pub mod b30;
pub mod chart;
pub mod conversion;
pub mod score;
pub mod step;

pub use b30::*;
pub use chart::*;
pub use conversion::*;
pub use score::*;
pub use step::*;
