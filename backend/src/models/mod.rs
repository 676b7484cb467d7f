pub mod detection;
pub mod time;

pub use detection::*;
pub use time::*;
