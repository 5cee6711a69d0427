//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_player;
mod http_transport;

pub use audio_player::{AudioPlayerPort, PlaybackError};
pub use http_transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransportPort, TransportError};
