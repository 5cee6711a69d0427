//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Synthesis Context: 合成请求
//! - Catalog Context: 服务端信息目录
//! - Perception Context: 感知测试

pub mod catalog;
pub mod perception;
pub mod synthesis;

// 命令行输入使用的文本分块
mod text_splitter;

pub use text_splitter::{split_text, SplitMode};
