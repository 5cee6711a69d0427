//! Perception Context - 感知测试限界上下文
//!
//! 职责:
//! - 评分选项结构解析
//! - 评分校验与序列化
//! - 测试会话与样本信息

mod errors;
mod ratings;
mod schema;
mod session;

pub use errors::PerceptionError;
pub use ratings::Ratings;
pub use schema::{OptionSchema, SCALE_LABELS, SCALE_POINTS};
pub use session::{is_valid_email, PerceptionSession, SampleDetails};
