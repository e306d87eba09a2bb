//! Resource trait and request/response types
//!
//! The framework owns the lifecycle: it builds a resource through its
//! factory, calls `configure` with the provider data, then drives the CRUD
//! methods. Resources only translate between state and their backend.

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{Diagnostic, Diagnostics, DynamicValue};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Constructor registered with the provider
pub type ResourceFactory = fn() -> Box<dyn Resource>;

/// Opaque data handed from provider configuration to resources
pub type ProviderData = Arc<dyn Any + Send + Sync>;

#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name including the provider prefix (e.g. "scaffolding_example")
    fn type_name(&self) -> &str;

    async fn schema(&self, ctx: Context) -> ResourceSchemaResponse;

    /// Called right after construction. `provider_data` is None when
    /// Terraform has not configured the provider yet (validation runs).
    async fn configure(
        &mut self,
        _ctx: Context,
        _request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        ConfigureResourceResponse::default()
    }

    /// MUST populate every attribute in new_state, computed ones included
    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse;

    /// Returns None in new_state when the remote object is gone
    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse;

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse;

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse;

    /// Called by `terraform import`. Resources that support it usually
    /// delegate to `import::import_state_passthrough_id`.
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse::default();
        response.diagnostics.push(Diagnostic::error(
            "Resource Import Not Implemented",
            format!(
                "This resource does not support import: {}",
                request.type_name
            ),
        ));
        response
    }
}

pub struct ResourceSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Diagnostics,
}

#[derive(Default)]
pub struct ConfigureResourceRequest {
    pub provider_data: Option<ProviderData>,
}

#[derive(Default)]
pub struct ConfigureResourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
}

pub struct ReadResourceResponse {
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Diagnostics,
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

#[derive(Default)]
pub struct DeleteResourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    pub id: String,
}

#[derive(Default)]
pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Diagnostics,
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}
