//! 应用层错误定义
//!
//! 统一的命令/查询错误类型。所有错误都在调用处报告，
//! 是否重试由调用方决定

use thiserror::Error;

use crate::application::ports::TransportError;
use crate::domain::perception::PerceptionError;

/// 应用层错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// 连接失败、DNS 失败等
    #[error("Transport error: {0}")]
    Transport(String),

    /// 请求超时
    #[error("Request timed out")]
    TimedOut,

    /// 非 2xx 响应，原样显示服务端返回的文本
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 用户输入校验失败，未发起任何请求
    #[error("{0}")]
    Validation(String),

    /// 响应格式无法解析
    #[error("Parse error: {0}")]
    Parse(String),

    /// 当前状态不允许该操作
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<TransportError> for ApplicationError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connect(message) => Self::Transport(message),
            TransportError::Timeout => Self::TimedOut,
            TransportError::Status { status, body } => Self::Server {
                status,
                message: body,
            },
            TransportError::Body(message) => Self::Transport(message),
        }
    }
}

impl From<PerceptionError> for ApplicationError {
    fn from(err: PerceptionError) -> Self {
        if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Parse(err.to_string())
        }
    }
}
