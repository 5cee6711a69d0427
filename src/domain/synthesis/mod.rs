//! Synthesis Context - 合成请求上下文
//!
//! 职责:
//! - 合成请求的构造与参数序列化
//! - 数据类型、音频格式值对象
//! - modification 可见性规则

mod form_params;
mod modification;
mod request;
mod value_objects;

pub use form_params::FormParams;
pub use modification::should_show_modification;
pub use request::SynthesisRequest;
pub use value_objects::{AudioFormat, EffectSelection, InputType, OutputType};
