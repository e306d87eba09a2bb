//! Provider trait and request/response types

use crate::context::Context;
use crate::data_source::DataSourceFactory;
use crate::resource::{ProviderData, ResourceFactory};
use crate::schema::Schema;
use crate::types::{Config, Diagnostics};
use async_trait::async_trait;

/// A Terraform provider.
///
/// Terraform calls `metadata` and `schema` first, then `configure` once per
/// run with the provider block. Resources and data sources are built from
/// the factory lists afterwards and receive the provider data returned by
/// `configure`.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn metadata(&self, ctx: Context) -> ProviderMetadataResponse;

    async fn schema(&self, ctx: Context) -> ProviderSchemaResponse;

    /// Errors in the response diagnostics stop Terraform before any
    /// resource or data source is touched
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse;

    fn resources(&self) -> Vec<ResourceFactory>;

    fn data_sources(&self) -> Vec<DataSourceFactory>;
}

pub struct ProviderMetadataResponse {
    /// Prefix of every resource and data source type name
    pub type_name: String,
    pub version: String,
}

pub struct ProviderSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Diagnostics,
}

pub struct ConfigureProviderRequest {
    pub terraform_version: String,
    pub config: Config,
}

#[derive(Default)]
pub struct ConfigureProviderResponse {
    pub diagnostics: Diagnostics,
    /// Handed to every data source's configure
    pub data_source_data: Option<ProviderData>,
    /// Handed to every resource's configure
    pub resource_data: Option<ProviderData>,
}
