//! HTTP client shared by every resource and data source

mod client;
pub mod error;

pub use client::{Client, ClientOptions};
pub use error::ApiError;
