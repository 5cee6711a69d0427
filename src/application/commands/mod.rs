//! 应用层 - 命令
//!
//! 会向服务端提交数据或推进会话状态的操作

mod synthesis_commands;

pub mod handlers;

pub use synthesis_commands::*;
