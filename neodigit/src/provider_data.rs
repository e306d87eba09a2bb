//! Provider data structure passed to resources and data sources

use crate::api::Client;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct NeodigitProviderData {
    pub client: Arc<Client>,
}

impl NeodigitProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
