//! Request worker bridging the event handler and the backend.
//!
//! The handler stays free of I/O: it emits typed requests, the worker performs
//! them and hands back typed responses, which re-enter the handler as events.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation executing requests against a [`Backend`](crate::api::Backend)

pub mod handler;
pub mod messages;

pub use handler::RequestWorker;
pub use messages::{ApiRequest, ApiResponse, TraceContext};
