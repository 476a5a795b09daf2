//! Concrete [`crate::ports::Transport`] implementations.

pub mod http;

pub use http::HttpTransport;
