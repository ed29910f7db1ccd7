//! Outbound transport implementations

mod http_transport;
mod log_transport;

pub use http_transport::HttpOutboundTransport;
pub use log_transport::LogOutboundTransport;
