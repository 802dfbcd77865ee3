//! HTTP client for the managed backend's REST & RPC endpoints.

use dioxus_logger::tracing;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    client::{
        config::Config,
        error::{backend::BackendError, Error},
    },
    model::api::ErrorDto,
};

const REST_PATH: &str = "/rest/v1";

/// Client for the backend's table queries and remote procedures.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    /// Creates a new instance of [`RestClient`]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend_url.clone(), config.anon_key.clone())
    }

    /// Selects rows from `table` using the backend's query string filters
    ///
    /// # Arguments
    /// - `table` - Table name, e.g. `dungeon_types`
    /// - `query` - Filter, ordering and limit parameters, e.g. `("is_active", "eq.true")`
    ///
    /// # Returns
    /// - `Ok(Vec<T>)` - Decoded rows, empty if nothing matched
    /// - `Err(Error)` - Transport failure, non-success status or malformed body
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = format!("{}{}/{}", self.base_url, REST_PATH, table);
        tracing::debug!("Selecting from {}", table);

        let request = self.authorize(self.http.get(url).query(query));
        let response = request.send().await?;

        read_json(response).await
    }

    /// Invokes the remote procedure `function` with an empty argument object
    pub(crate) async fn rpc<T: DeserializeOwned>(&self, function: &str) -> Result<T, Error> {
        let url = format!("{}{}/rpc/{}", self.base_url, REST_PATH, function);
        tracing::debug!("Calling remote procedure {}", function);

        let request = self.authorize(self.http.post(url).json(&serde_json::json!({})));
        let response = request.send().await?;

        read_json(response).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

/// Decodes a successful response body or converts the failure into [`BackendError::Status`]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    let message = match serde_json::from_str::<ErrorDto>(&body) {
        Ok(error_dto) => error_dto.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body,
    };

    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    }
    .into())
}
