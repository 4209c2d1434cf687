//! MetaScan API Library
//!
//! This crate provides the HTTP handlers, error rendering and application setup.

mod api_doc;
mod handlers;
pub mod setup;
pub mod telemetry;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
