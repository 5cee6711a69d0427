//! Transport Adapter - HTTP 传输实现

mod fake_transport;
mod http_transport_client;

pub use fake_transport::FakeTransport;
pub use http_transport_client::*;
