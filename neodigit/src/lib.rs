pub mod api;
pub mod config;
pub mod data_sources;
pub mod env;
pub mod provider_data;
pub mod resources;
pub mod sensitive;

use async_trait::async_trait;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::data_source::ConfigureDataSourceRequest;
use tfplug::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, ProviderMetadataResponse,
    ProviderSchemaResponse,
};
use tfplug::resource::ConfigureResourceRequest;
use tfplug::schema::{AttributeBuilder, Schema, SchemaBuilder};
use tfplug::{
    DataSource, DataSourceFactory, Diagnostics, Provider, ProviderData, Resource,
    ResourceFactory, TfplugError,
};

use crate::api::{Client, ClientOptions};
use crate::config::{ProviderConfig, API_KEY_ATTR, ENDPOINT_ATTR};
use crate::env::{EnvReader, ProcessEnv};

pub use crate::provider_data::NeodigitProviderData;

/// Prefix of every resource and data source type name
pub const TYPE_NAME: &str = "scaffolding";

/// Version used for local builds
pub const DEV_VERSION: &str = "dev";
/// Version used by acceptance tests
pub const TEST_VERSION: &str = "test";

/// Where the provider is in its configure lifecycle
#[derive(Debug, Clone)]
pub enum ProviderState {
    Unconfigured,
    Configured(Arc<NeodigitProviderData>),
    Failed,
}

pub struct NeodigitProvider {
    version: String,
    env: Arc<dyn EnvReader>,
    state: ProviderState,
}

impl NeodigitProvider {
    /// `version` is the release version, "dev" for local builds or "test"
    /// under acceptance testing
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_env(version, Arc::new(ProcessEnv))
    }

    /// Provider that reads its environment fallback from `env`
    pub fn with_env(version: impl Into<String>, env: Arc<dyn EnvReader>) -> Self {
        Self {
            version: version.into(),
            env,
            state: ProviderState::Unconfigured,
        }
    }

    /// Constructor for a plugin server that builds a fresh provider per session
    pub fn factory(version: impl Into<String>) -> impl Fn() -> NeodigitProvider {
        let version = version.into();
        move || NeodigitProvider::new(version.clone())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn state(&self) -> &ProviderState {
        &self.state
    }

    pub fn provider_data(&self) -> Option<&Arc<NeodigitProviderData>> {
        match &self.state {
            ProviderState::Configured(data) => Some(data),
            _ => None,
        }
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::string(ENDPOINT_ATTR)
                    .markdown_description("Provider endpoint")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::string(API_KEY_ATTR)
                    .markdown_description("API Key")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .build()
    }

    /// Builds the named resource and hands it the provider data
    pub async fn create_resource(&self, type_name: &str) -> tfplug::Result<Box<dyn Resource>> {
        let data = self
            .provider_data()
            .ok_or(TfplugError::ProviderNotConfigured)?
            .clone();

        let mut resource = self
            .resources()
            .into_iter()
            .map(|factory| factory())
            .find(|r| r.type_name() == type_name)
            .ok_or_else(|| TfplugError::ResourceNotFound(type_name.to_string()))?;

        let provider_data: ProviderData = data;
        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(provider_data),
                },
            )
            .await;
        ensure_no_errors(type_name, &response.diagnostics)?;

        Ok(resource)
    }

    /// Builds the named data source and hands it the provider data
    pub async fn create_data_source(&self, type_name: &str) -> tfplug::Result<Box<dyn DataSource>> {
        let data = self
            .provider_data()
            .ok_or(TfplugError::ProviderNotConfigured)?
            .clone();

        let mut data_source = self
            .data_sources()
            .into_iter()
            .map(|factory| factory())
            .find(|d| d.type_name() == type_name)
            .ok_or_else(|| TfplugError::DataSourceNotFound(type_name.to_string()))?;

        let provider_data: ProviderData = data;
        let response = data_source
            .configure(
                Context::new(),
                ConfigureDataSourceRequest {
                    provider_data: Some(provider_data),
                },
            )
            .await;
        ensure_no_errors(type_name, &response.diagnostics)?;

        Ok(data_source)
    }

    fn fail(&mut self, diagnostics: Diagnostics) -> ConfigureProviderResponse {
        tracing::warn!(
            "Provider configuration failed with {} diagnostic(s)",
            diagnostics.len()
        );
        self.state = ProviderState::Failed;
        ConfigureProviderResponse {
            diagnostics,
            ..Default::default()
        }
    }
}

fn ensure_no_errors(type_name: &str, diagnostics: &Diagnostics) -> tfplug::Result<()> {
    match diagnostics.errors().next() {
        Some(diag) => Err(TfplugError::Custom(format!(
            "Failed to configure {}: {}",
            type_name, diag.summary
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl Provider for NeodigitProvider {
    async fn metadata(&self, _ctx: Context) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    async fn schema(&self, _ctx: Context) -> ProviderSchemaResponse {
        ProviderSchemaResponse {
            schema: Self::schema_static(),
            diagnostics: Diagnostics::new(),
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        tracing::debug!(
            "Configuring provider for Terraform {}, config: {:?}",
            request.terraform_version,
            Self::schema_static().redact(&request.config)
        );

        let config = match ProviderConfig::from_config(&request.config) {
            Ok(config) => config,
            Err(diagnostics) => return self.fail(diagnostics),
        };

        let resolved = match config.resolve(self.env.as_ref()) {
            Ok(resolved) => resolved,
            Err(diagnostics) => return self.fail(diagnostics),
        };

        let options = ClientOptions::for_version(&self.version);
        let client = Client::with_options(&resolved, options);

        tracing::debug!("Provider configured for endpoint {}", client.base_url());

        let data = Arc::new(NeodigitProviderData::new(client));
        self.state = ProviderState::Configured(data.clone());

        ConfigureProviderResponse {
            diagnostics: Diagnostics::new(),
            data_source_data: Some(data.clone()),
            resource_data: Some(data),
        }
    }

    fn resources(&self) -> Vec<ResourceFactory> {
        vec![resources::ExampleResource::factory as ResourceFactory]
    }

    fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![data_sources::ExampleDataSource::factory as DataSourceFactory]
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::config::{API_KEY_ENV, ENDPOINT_ENV};
    use crate::env::MapEnv;
    use tfplug::{Dynamic, DynamicValue};

    fn provider_with_env(env: MapEnv) -> NeodigitProvider {
        NeodigitProvider::with_env(TEST_VERSION, Arc::new(env))
    }

    fn request(config: DynamicValue) -> ConfigureProviderRequest {
        ConfigureProviderRequest {
            terraform_version: "1.9.0".to_string(),
            config,
        }
    }

    fn empty_block() -> DynamicValue {
        DynamicValue::object([("endpoint", Dynamic::Null), ("api_key", Dynamic::Null)])
    }

    #[tokio::test]
    async fn metadata_reports_type_name_and_version() {
        let provider = NeodigitProvider::new("1.4.0");
        let metadata = provider.metadata(Context::new()).await;
        assert_eq!(metadata.type_name, "scaffolding");
        assert_eq!(metadata.version, "1.4.0");
    }

    #[tokio::test]
    async fn schema_marks_api_key_sensitive() {
        let provider = NeodigitProvider::new(DEV_VERSION);
        let schema = provider.schema(Context::new()).await.schema;

        let endpoint = schema.attribute("endpoint").unwrap();
        assert!(endpoint.optional);
        assert!(!endpoint.sensitive);

        let api_key = schema.attribute("api_key").unwrap();
        assert!(api_key.optional);
        assert!(api_key.sensitive);
        assert_eq!(schema.attributes.len(), 2);
    }

    #[tokio::test]
    async fn configures_from_environment() {
        let mut provider = provider_with_env(
            MapEnv::new()
                .with(ENDPOINT_ENV, "https://api.example.com")
                .with(API_KEY_ENV, "k1"),
        );

        let response = provider.configure(Context::new(), request(empty_block())).await;

        assert!(response.diagnostics.is_empty());
        let data = provider.provider_data().unwrap();
        assert_eq!(data.client.base_url(), "https://api.example.com");
    }

    #[tokio::test]
    async fn resources_and_data_sources_share_one_client() {
        let mut provider = provider_with_env(
            MapEnv::new()
                .with(ENDPOINT_ENV, "https://api.example.com")
                .with(API_KEY_ENV, "k1"),
        );

        let response = provider.configure(Context::new(), request(empty_block())).await;

        let resource_data = response
            .resource_data
            .unwrap()
            .downcast::<NeodigitProviderData>()
            .unwrap();
        let data_source_data = response
            .data_source_data
            .unwrap()
            .downcast::<NeodigitProviderData>()
            .unwrap();
        assert!(Arc::ptr_eq(&resource_data, &data_source_data));
        assert!(Arc::ptr_eq(&resource_data, provider.provider_data().unwrap()));
    }

    #[tokio::test]
    async fn missing_values_fail_with_two_diagnostics() {
        let mut provider = provider_with_env(MapEnv::new());

        let response = provider.configure(Context::new(), request(empty_block())).await;

        assert_eq!(response.diagnostics.len(), 2);
        assert!(response.resource_data.is_none());
        assert!(response.data_source_data.is_none());
        assert!(matches!(provider.state(), ProviderState::Failed));
    }

    #[tokio::test]
    async fn unknown_endpoint_fails_even_with_environment() {
        let mut provider = provider_with_env(
            MapEnv::new()
                .with(ENDPOINT_ENV, "https://api.example.com")
                .with(API_KEY_ENV, "k1"),
        );
        let config = DynamicValue::object([
            ("endpoint", Dynamic::Unknown),
            ("api_key", Dynamic::String("k2".to_string())),
        ]);

        let response = provider.configure(Context::new(), request(config)).await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(provider.provider_data().is_none());
    }

    #[tokio::test]
    async fn hostname_only_endpoint_configures() {
        let mut provider = provider_with_env(
            MapEnv::new()
                .with(ENDPOINT_ENV, "api.neodigit.net")
                .with(API_KEY_ENV, "k1"),
        );

        let response = provider
            .configure(Context::new(), request(DynamicValue::null()))
            .await;

        assert!(response.diagnostics.is_empty());
        match provider.state() {
            ProviderState::Configured(data) => {
                assert_eq!(data.client.base_url(), "api.neodigit.net")
            }
            other => panic!("expected configured provider, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn api_key_with_control_characters_still_configures() {
        let mut provider = provider_with_env(MapEnv::new());
        let config = DynamicValue::object([
            ("endpoint", Dynamic::String("https://api.example.com".to_string())),
            ("api_key", Dynamic::String("bad\nkey".to_string())),
        ]);

        let response = provider.configure(Context::new(), request(config)).await;

        assert!(response.diagnostics.is_empty());
        assert!(matches!(provider.state(), ProviderState::Configured(_)));
    }

    #[tokio::test]
    async fn reconfigure_after_failure_succeeds() {
        let mut provider = provider_with_env(MapEnv::new().with(API_KEY_ENV, "k1"));

        provider.configure(Context::new(), request(empty_block())).await;
        assert!(matches!(provider.state(), ProviderState::Failed));

        let config = DynamicValue::object([(
            "endpoint",
            Dynamic::String("https://api.example.com".to_string()),
        )]);
        let response = provider.configure(Context::new(), request(config)).await;

        assert!(response.diagnostics.is_empty());
        assert!(matches!(provider.state(), ProviderState::Configured(_)));
    }

    #[tokio::test]
    async fn factories_register_the_example_types() {
        let provider = NeodigitProvider::new(TEST_VERSION);

        let resources: Vec<_> = provider.resources().iter().map(|f| f()).collect();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].type_name(), "scaffolding_example");

        let data_sources: Vec<_> = provider.data_sources().iter().map(|f| f()).collect();
        assert_eq!(data_sources.len(), 1);
        assert_eq!(data_sources[0].type_name(), "scaffolding_example");
    }

    #[tokio::test]
    async fn create_resource_requires_configuration() {
        let provider = NeodigitProvider::new(TEST_VERSION);

        let err = provider
            .create_resource("scaffolding_example")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, TfplugError::ProviderNotConfigured));
    }

    #[tokio::test]
    async fn create_unknown_types_fail() {
        let mut provider = provider_with_env(
            MapEnv::new()
                .with(ENDPOINT_ENV, "https://api.example.com")
                .with(API_KEY_ENV, "k1"),
        );
        provider.configure(Context::new(), request(empty_block())).await;

        assert!(provider.create_resource("scaffolding_example").await.is_ok());
        assert!(matches!(
            provider.create_resource("scaffolding_missing").await.err(),
            Some(TfplugError::ResourceNotFound(_))
        ));
        assert!(provider.create_data_source("scaffolding_example").await.is_ok());
        assert!(matches!(
            provider.create_data_source("scaffolding_missing").await.err(),
            Some(TfplugError::DataSourceNotFound(_))
        ));
    }

    #[test]
    fn factory_builds_fresh_unconfigured_providers() {
        let factory = NeodigitProvider::factory(DEV_VERSION);
        let provider = factory();
        assert_eq!(provider.version(), "dev");
        assert!(matches!(provider.state(), ProviderState::Unconfigured));
    }
}
