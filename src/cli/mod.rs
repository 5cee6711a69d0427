//! CLI - 命令行驱动
//!
//! 解析参数、组装适配器，并执行合成、目录查询或感知测试

mod args;
mod driver;
mod perception;

pub use args::{CatalogKind, CliArgs, EffectArg, DEFAULT_GREETING};
pub use driver::{CommandLineDriver, DriverError};
pub use perception::{parse_checkbox_answer, parse_scale_answer, run_perception_test, Console};
