//! tfplug - Terraform Plugin Framework for Rust
//!
//! The provider-facing half of a Terraform plugin framework: three-state
//! values, diagnostics, schema declaration and the provider, resource and
//! data source traits a provider implements.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod data_source;
pub mod provider;
pub mod resource;

// Helper modules
pub mod import;

// Re-exports for convenience
pub use context::Context;
pub use data_source::{DataSource, DataSourceFactory};
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use provider::{ConfigureProviderRequest, ConfigureProviderResponse, Provider};
pub use resource::{ProviderData, Resource, ResourceFactory};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{
    AttributePath, Config, Diagnostic, DiagnosticSeverity, Diagnostics, Dynamic, DynamicValue,
    State, StringValue,
};
