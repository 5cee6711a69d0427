//! 应用层 - 查询（读操作）
//!
//! 只读取服务端信息，不改变任何状态

mod catalog_queries;

pub mod handlers;

pub use catalog_queries::*;
