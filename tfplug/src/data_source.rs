//! DataSource trait and request/response types

use crate::context::Context;
use crate::resource::ProviderData;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;

/// Constructor registered with the provider
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

/// Data sources only read; Terraform never stores changes through them
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name including the provider prefix
    fn type_name(&self) -> &str;

    async fn schema(&self, ctx: Context) -> DataSourceSchemaResponse;

    /// Receives the provider data; None before the provider is configured
    async fn configure(
        &mut self,
        _ctx: Context,
        _request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        ConfigureDataSourceResponse::default()
    }

    /// MUST populate every attribute in state
    async fn read(&self, ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse;
}

pub struct DataSourceSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Diagnostics,
}

#[derive(Default)]
pub struct ConfigureDataSourceRequest {
    pub provider_data: Option<ProviderData>,
}

#[derive(Default)]
pub struct ConfigureDataSourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct ReadDataSourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ReadDataSourceResponse {
    pub state: DynamicValue,
    pub diagnostics: Diagnostics,
}
