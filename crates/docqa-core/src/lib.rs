//! Shared plumbing for docqa: configuration, logging and the transport to
//! the document question-answering service.

pub mod config;
pub mod logging;
pub mod transport;
