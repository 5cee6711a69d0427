//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod transport;

pub use audio::*;
pub use transport::*;
