//! MARY TTS Client - MARY 文本转语音服务的 HTTP 客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 合成请求与参数序列化
//! - Catalog Context: 音色、数据类型、音频格式、音效目录解析
//! - Perception Context: 感知测试会话与评分
//!
//! 应用层 (application/):
//! - Ports: 端口定义（HttpTransport, AudioPlayer）
//! - Commands: TtsSessionClient, PerceptionTestController
//! - Queries: CatalogFetcher
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: reqwest 传输、测试用传输、音频输出
//!
//! 命令行 (cli/):
//! - CommandLineDriver 与交互式感知测试

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
