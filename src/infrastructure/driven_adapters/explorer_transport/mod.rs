//! Explorer Transport Adapters

pub mod http;

pub use http::HttpExplorerTransport;
