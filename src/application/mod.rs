//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（HttpTransport、AudioPlayer）
//! - commands: 合成与感知测试命令及处理器
//! - queries: 服务端目录查询及处理器
//! - endpoints: 服务端端点路径
//! - error: 应用层错误定义

pub mod commands;
pub mod endpoints;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{PerceptionState, PerceptionTestController, TtsSessionClient},
    SynthesisOutcome,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio player
    AudioPlayerPort,
    PlaybackError,
    // HTTP transport
    HttpMethod,
    HttpRequest,
    HttpResponse,
    HttpTransportPort,
    TransportError,
};

pub use queries::{handlers::CatalogFetcher, ExampleTextQuery};
