//! API layer - HTTP entry points.

pub mod auth;
mod controllers;
pub mod http;
pub mod pipeline;


pub use http::{routes, ApiError};
