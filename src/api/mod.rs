//! Request layer talking to the REST backend.
//!
//! # Modules
//!
//! - `backend`: [`Backend`] trait, one method per REST call
//! - `endpoint`: method + path of every call
//! - `http`: blocking `reqwest` implementation
//! - `reply`: shared response decoding and error classification

pub mod backend;
pub mod endpoint;
pub mod http;
pub mod reply;

pub use backend::Backend;
pub use endpoint::Endpoint;
pub use http::HttpBackend;
pub use reply::{decode_ack, decode_reply};
