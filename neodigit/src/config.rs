//! Provider configuration resolution
//!
//! Turns the provider block plus environment fallback into a usable
//! configuration, or into the full list of problems with it.

use crate::env::EnvReader;
use crate::sensitive::Sensitive;
use tfplug::{AttributePath, Config, Diagnostics, StringValue};

pub const ENDPOINT_ATTR: &str = "endpoint";
pub const API_KEY_ATTR: &str = "api_key";

pub const ENDPOINT_ENV: &str = "NEODIGIT_ENDPOINT";
pub const API_KEY_ENV: &str = "NEODIGIT_API_KEY";

/// The provider block as written by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub endpoint: StringValue,
    pub api_key: Sensitive<StringValue>,
}

/// Configuration with every value present
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub api_key: Sensitive<String>,
}

impl ProviderConfig {
    /// Decodes the provider block. A value of the wrong type is reported
    /// against its attribute and nothing is resolved.
    pub fn from_config(config: &Config) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();

        let mut read = |name: &str| {
            let path = AttributePath::new(name);
            match config.get_string_value(&path) {
                Ok(value) => value,
                Err(e) => {
                    diags.add_attribute_error(
                        path,
                        "Invalid Provider Attribute",
                        format!("The \"{}\" attribute must be a string: {}", name, e),
                    );
                    StringValue::Null
                }
            }
        };

        let endpoint = read(ENDPOINT_ATTR);
        let api_key = Sensitive::new(read(API_KEY_ATTR));

        if diags.has_errors() {
            return Err(diags);
        }

        Ok(Self { endpoint, api_key })
    }

    /// Resolves the effective endpoint and API key.
    ///
    /// Explicit values win over `NEODIGIT_ENDPOINT` / `NEODIGIT_API_KEY`.
    /// Every check runs even after an earlier one failed, so the caller gets
    /// all diagnostics at once; any diagnostic fails the whole resolution.
    pub fn resolve(&self, env: &dyn EnvReader) -> Result<ResolvedConfig, Diagnostics> {
        let mut diags = Diagnostics::new();

        if self.endpoint.is_unknown() {
            diags.add_attribute_error(
                AttributePath::new(ENDPOINT_ATTR),
                "Missing endpoint required for provider configuration.",
                "The provider cannot create the client without the endpoint.",
            );
        }

        if self.api_key.expose().is_unknown() {
            diags.add_attribute_error(
                AttributePath::new(API_KEY_ATTR),
                "Missing api_key required for provider configuration.",
                "The provider cannot create the client without the api_key.",
            );
        }

        let endpoint = effective(&self.endpoint, env, ENDPOINT_ENV);
        let api_key = effective(self.api_key.expose(), env, API_KEY_ENV);

        if endpoint.is_empty() {
            diags.add_attribute_error(
                AttributePath::new(ENDPOINT_ATTR),
                format!("Set Terraform environment variable {}", ENDPOINT_ENV),
                "If either is already set, ensure the value is not empty.",
            );
        }

        if api_key.is_empty() {
            diags.add_attribute_error(
                AttributePath::new(API_KEY_ATTR),
                format!("Set Terraform environment variable {}", API_KEY_ENV),
                "If either is already set, ensure the value is not empty.",
            );
        }

        if !diags.is_empty() {
            return Err(diags);
        }

        Ok(ResolvedConfig {
            endpoint,
            api_key: Sensitive::new(api_key),
        })
    }
}

/// Explicit value when set, otherwise the environment (empty when unset).
/// Unknown values fall through to the environment too; the unknown check
/// has already reported them.
fn effective(value: &StringValue, env: &dyn EnvReader, var: &str) -> String {
    match value {
        StringValue::Known(s) => s.clone(),
        StringValue::Null | StringValue::Unknown => env.var(var).unwrap_or_default(),
    }
}
