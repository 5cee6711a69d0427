//! Command Handlers 实现

mod perception_handlers;
mod synthesis_handlers;

pub use perception_handlers::*;
pub use synthesis_handlers::*;
