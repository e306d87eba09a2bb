#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use mockito::Server;
use neodigit::config::{API_KEY_ENV, ENDPOINT_ENV};
use neodigit::env::MapEnv;
use neodigit::{NeodigitProvider, NeodigitProviderData, ProviderState, TEST_VERSION};
use serial_test::serial;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tfplug::data_source::ReadDataSourceRequest;
use tfplug::provider::ConfigureProviderRequest;
use tfplug::{AttributePath, Context, Dynamic, DynamicValue, Provider};

fn request(config: DynamicValue) -> ConfigureProviderRequest {
    ConfigureProviderRequest {
        terraform_version: "1.9.0".to_string(),
        config,
    }
}

fn explicit_block(endpoint: &str, api_key: &str) -> DynamicValue {
    DynamicValue::object([
        ("endpoint", Dynamic::String(endpoint.to_string())),
        ("api_key", Dynamic::String(api_key.to_string())),
    ])
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn configured_client_talks_to_endpoint_with_api_key() {
    let mut server = Server::new_async().await;
    let status_mock = server
        .mock("GET", "/status")
        .match_header("authorization", "Bearer k1")
        .match_header("user-agent", "terraform-provider-neodigit/test")
        .with_header("content-type", "application/json")
        .with_body(r#"{"healthy":true}"#)
        .create_async()
        .await;

    let mut provider = NeodigitProvider::with_env(TEST_VERSION, Arc::new(MapEnv::new()));
    let response = provider
        .configure(Context::new(), request(explicit_block(&server.url(), "k1")))
        .await;
    assert!(response.diagnostics.is_empty());

    let data = response
        .resource_data
        .unwrap()
        .downcast::<NeodigitProviderData>()
        .unwrap();
    let body: serde_json::Value = data.client.get("/status").await.unwrap();

    assert_eq!(body["healthy"], serde_json::Value::Bool(true));
    status_mock.assert_async().await;
}

#[tokio::test]
async fn client_maps_error_statuses() {
    let mut server = Server::new_async().await;
    let _unauthorized = server
        .mock("GET", "/secret")
        .with_status(401)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/broken")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let mut provider = NeodigitProvider::with_env(TEST_VERSION, Arc::new(MapEnv::new()));
    provider
        .configure(Context::new(), request(explicit_block(&server.url(), "k1")))
        .await;
    let client = provider.provider_data().unwrap().client.clone();

    let err = client.get::<serde_json::Value>("/secret").await.unwrap_err();
    assert!(matches!(err, neodigit::api::ApiError::AuthError));

    let err = client.get::<serde_json::Value>("/broken").await.unwrap_err();
    assert!(matches!(
        err,
        neodigit::api::ApiError::ApiError { status: 500, ref message } if message == "boom"
    ));
}

#[tokio::test]
async fn data_source_reads_after_provider_configuration() {
    let mut provider = NeodigitProvider::with_env(
        TEST_VERSION,
        Arc::new(
            MapEnv::new()
                .with(ENDPOINT_ENV, "https://api.example.com")
                .with(API_KEY_ENV, "k1"),
        ),
    );
    provider
        .configure(Context::new(), request(DynamicValue::null()))
        .await;

    let data_source = provider
        .create_data_source("scaffolding_example")
        .await
        .unwrap();
    let response = data_source
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: "scaffolding_example".to_string(),
                config: DynamicValue::object([("configurable_attribute", Dynamic::Null)]),
            },
        )
        .await;

    assert!(!response.diagnostics.has_errors());
    assert_eq!(
        response.state.get_string(&AttributePath::new("id")).unwrap(),
        "example-id"
    );
}

#[tokio::test]
async fn configure_logs_never_contain_api_key() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut provider = NeodigitProvider::with_env(TEST_VERSION, Arc::new(MapEnv::new()));
    let response = provider
        .configure(
            Context::new(),
            request(explicit_block("https://api.example.com", "k1-very-secret")),
        )
        .await;
    assert!(response.diagnostics.is_empty());

    let output = logs.contents();
    assert!(output.contains("https://api.example.com"));
    assert!(!output.contains("k1-very-secret"));
}

#[tokio::test]
#[serial]
async fn provider_falls_back_to_process_environment() {
    std::env::set_var(ENDPOINT_ENV, "https://env.example.com");
    std::env::set_var(API_KEY_ENV, "env-key");

    let mut provider = NeodigitProvider::new(TEST_VERSION);
    let response = provider
        .configure(Context::new(), request(DynamicValue::null()))
        .await;

    std::env::remove_var(ENDPOINT_ENV);
    std::env::remove_var(API_KEY_ENV);

    assert!(response.diagnostics.is_empty());
    match provider.state() {
        ProviderState::Configured(data) => {
            assert_eq!(data.client.base_url(), "https://env.example.com")
        }
        other => panic!("expected configured provider, got {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn provider_reports_both_missing_values_without_environment() {
    std::env::remove_var(ENDPOINT_ENV);
    std::env::remove_var(API_KEY_ENV);

    let mut provider = NeodigitProvider::new(TEST_VERSION);
    let response = provider
        .configure(Context::new(), request(DynamicValue::null()))
        .await;

    let summaries: Vec<_> = response
        .diagnostics
        .iter()
        .map(|d| d.summary.clone())
        .collect();
    assert_eq!(
        summaries,
        vec![
            "Set Terraform environment variable NEODIGIT_ENDPOINT",
            "Set Terraform environment variable NEODIGIT_API_KEY",
        ]
    );
}
