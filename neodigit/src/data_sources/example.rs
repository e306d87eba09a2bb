//! Example data source registered by the scaffold

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource,
    DataSourceSchemaResponse, ReadDataSourceRequest, ReadDataSourceResponse,
};
use tfplug::schema::{AttributeBuilder, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, Diagnostics};

use crate::provider_data::NeodigitProviderData;

pub const TYPE_NAME: &str = "scaffolding_example";
pub const EXAMPLE_ID: &str = "example-id";

#[derive(Default)]
pub struct ExampleDataSource {
    provider_data: Option<NeodigitProviderData>,
}

impl ExampleDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory registered in `NeodigitProvider::data_sources`
    pub fn factory() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }

    pub fn provider_data(&self) -> Option<&NeodigitProviderData> {
        self.provider_data.as_ref()
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .markdown_description("Example data source")
            .attribute(
                AttributeBuilder::string("configurable_attribute")
                    .markdown_description("Example configurable attribute")
                    .optional()
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
impl DataSource for ExampleDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    async fn schema(&self, _ctx: Context) -> DataSourceSchemaResponse {
        DataSourceSchemaResponse {
            schema: Self::schema_static(),
            diagnostics: Diagnostics::new(),
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        let mut diagnostics = Diagnostics::new();

        tracing::debug!(
            "Configuring example data source, provider_data provided: {:?}",
            request.provider_data.is_some()
        );

        if let Some(data) = request.provider_data {
            if let Some(provider_data) = data.downcast_ref::<NeodigitProviderData>() {
                self.provider_data = Some(provider_data.clone());
            } else {
                tracing::error!("Failed to downcast provider data to NeodigitProviderData");
                diagnostics.push(Diagnostic::error(
                    "Unexpected Data Source Configure Type",
                    "Expected NeodigitProviderData. Please report this issue to the provider developers.",
                ));
            }
        }

        ConfigureDataSourceResponse { diagnostics }
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = Diagnostics::new();
        let mut state = request.config;

        if let Err(e) = state.set_string(&AttributePath::new("id"), EXAMPLE_ID) {
            diagnostics.push(Diagnostic::error("Failed to set id", e.to_string()));
        }

        tracing::trace!("read a data source");

        ReadDataSourceResponse { state, diagnostics }
    }
}
