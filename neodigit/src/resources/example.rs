//! Example resource registered by the scaffold
//!
//! Placeholder with no backend calls; it shows how a resource receives
//! the shared client and fills computed attributes.

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::import_state_passthrough_id;
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceSchemaResponse, UpdateResourceRequest,
    UpdateResourceResponse,
};
use tfplug::schema::{AttributeBuilder, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, Diagnostics, Dynamic};

use crate::provider_data::NeodigitProviderData;

pub const TYPE_NAME: &str = "scaffolding_example";
pub const EXAMPLE_ID: &str = "example-id";
pub const DEFAULTED_VALUE: &str = "example value";

#[derive(Default)]
pub struct ExampleResource {
    provider_data: Option<NeodigitProviderData>,
}

impl ExampleResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory registered in `NeodigitProvider::resources`
    pub fn factory() -> Box<dyn Resource> {
        Box::new(Self::new())
    }

    pub fn provider_data(&self) -> Option<&NeodigitProviderData> {
        self.provider_data.as_ref()
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .markdown_description("Example resource")
            .attribute(
                AttributeBuilder::string("configurable_attribute")
                    .markdown_description("Example configurable attribute")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::string("defaulted")
                    .markdown_description("Example configurable attribute with default value")
                    .optional()
                    .default_value(Dynamic::String(DEFAULTED_VALUE.to_string()))
                    .build(),
            )
            .attribute(
                AttributeBuilder::string("id")
                    .markdown_description("Example identifier")
                    .computed()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl Resource for ExampleResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    async fn schema(&self, _ctx: Context) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: Self::schema_static(),
            diagnostics: Diagnostics::new(),
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let mut diagnostics = Diagnostics::new();

        // Terraform builds resources before the provider is configured
        // (e.g. during validation); there is nothing to store yet.
        let Some(data) = request.provider_data else {
            return ConfigureResourceResponse { diagnostics };
        };

        match data.downcast_ref::<NeodigitProviderData>() {
            Some(provider_data) => {
                self.provider_data = Some(provider_data.clone());
                tracing::debug!("Configured {} with provider data", TYPE_NAME);
            }
            None => {
                tracing::error!("Failed to downcast provider data to NeodigitProviderData");
                diagnostics.push(Diagnostic::error(
                    "Unexpected Resource Configure Type",
                    "Expected NeodigitProviderData. Please report this issue to the provider developers.",
                ));
            }
        }

        ConfigureResourceResponse { diagnostics }
    }

    async fn create(&self, _ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();
        let mut new_state = request.planned_state;

        Self::schema_static().apply_defaults(&mut new_state);
        if let Err(e) = new_state.set_string(&AttributePath::new("id"), EXAMPLE_ID) {
            diagnostics.push(Diagnostic::error("Failed to set id", e.to_string()));
        }

        tracing::trace!("created a resource");

        CreateResourceResponse {
            new_state,
            diagnostics,
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        ReadResourceResponse {
            new_state: Some(request.current_state),
            diagnostics: Diagnostics::new(),
        }
    }

    async fn update(&self, _ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse {
        let mut new_state = request.planned_state;
        Self::schema_static().apply_defaults(&mut new_state);

        UpdateResourceResponse {
            new_state,
            diagnostics: Diagnostics::new(),
        }
    }

    async fn delete(&self, _ctx: Context, _request: DeleteResourceRequest) -> DeleteResourceResponse {
        DeleteResourceResponse::default()
    }

    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse::default();
        import_state_passthrough_id(&ctx, AttributePath::new("id"), &request, &mut response);
        response
    }
}
