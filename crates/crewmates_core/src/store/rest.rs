//! REST client for the hosted table interface.
//!
//! # Responsibility
//! - Build per-table requests with the backend's filter-and-order grammar.
//! - Translate HTTP responses into `StoreResult` values.
//!
//! # Invariants
//! - Every request carries the configured `apikey` and bearer credential.
//! - Mutations ask for `return=representation` so callers get the row back.
//! - `single()` requests exactly-one-row semantics; zero or multiple
//!   matches surface as `RowNotFound`.

use super::{StoreConfig, StoreError, StoreResult};
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

const REST_PATH: &str = "rest/v1";
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Sort direction for the `order` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    fn suffix(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Configured handle to the hosted REST interface.
///
/// Construction is side-effect-free; the underlying connection pool is the
/// HTTP client's concern and not re-exposed here.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Starts a fluent request against one table.
    pub fn from(&self, table: impl Into<String>) -> TableRequest<'_> {
        TableRequest {
            client: self,
            table: table.into(),
            query: Vec::new(),
            single: false,
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.config.base_url)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.config.api_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}

/// Fluent single-use request builder for one table.
#[derive(Debug)]
pub struct TableRequest<'a> {
    client: &'a RestClient,
    table: String,
    query: Vec<(String, String)>,
    single: bool,
}

impl TableRequest<'_> {
    /// Restricts the returned columns (`*` selects all).
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.query.push(("select".to_string(), columns.into()));
        self
    }

    /// Adds an equality filter on one column.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.query
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Orders the result set by one column.
    pub fn order(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.query
            .push(("order".to_string(), format!("{}.{}", column.into(), direction.suffix())));
        self
    }

    /// Requests exactly-one-row semantics for the terminal operation.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Executes a select and decodes the response rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> StoreResult<T> {
        self.execute(Method::GET, None::<&()>).await
    }

    /// Inserts one row and decodes the stored representation.
    pub async fn insert<T: DeserializeOwned>(self, row: &impl Serialize) -> StoreResult<T> {
        self.execute(Method::POST, Some(row)).await
    }

    /// Applies a partial update to the filtered rows and decodes the result.
    pub async fn update<T: DeserializeOwned>(self, changes: &impl Serialize) -> StoreResult<T> {
        self.execute(Method::PATCH, Some(changes)).await
    }

    /// Deletes the filtered rows. Absence of a match is not an error.
    pub async fn delete(self) -> StoreResult<()> {
        let (table, single) = (self.table.clone(), self.single);
        let response = self.send(Method::DELETE, None::<&()>).await?;
        Self::check_status(&table, single, response.status(), response.text().await.ok())?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        self,
        method: Method,
        body: Option<&impl Serialize>,
    ) -> StoreResult<T> {
        let (table, single) = (self.table.clone(), self.single);
        let response = self.send(method, body).await?;
        let status = response.status();
        let body = response.text().await?;
        Self::check_status(&table, single, status, Some(body.clone()))?;
        debug!("event=store_request module=store status=ok table={table}");
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(
        self,
        method: Method,
        body: Option<&impl Serialize>,
    ) -> StoreResult<reqwest::Response> {
        let mut request = self
            .client
            .http
            .request(method, self.client.endpoint(&self.table))
            .headers(self.client.auth_headers())
            .query(&self.query);

        if self.single {
            request = request.header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE);
        }
        if body.is_some() {
            // Mutations need the stored row back for the uniform result shape.
            request = request.header("Prefer", "return=representation");
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    fn check_status(
        table: &str,
        single: bool,
        status: StatusCode,
        body: Option<String>,
    ) -> StoreResult<()> {
        if status.is_success() {
            return Ok(());
        }

        // The backend reports a violated exactly-one-row request as 406.
        if single && status == StatusCode::NOT_ACCEPTABLE {
            error!("event=store_request module=store status=error table={table} error_code=row_not_found");
            return Err(StoreError::RowNotFound);
        }

        let message = body
            .as_deref()
            .and_then(|text| serde_json::from_str::<serde_json::Value>(text).ok())
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .or(body)
            .unwrap_or_else(|| "no response body".to_string());

        error!(
            "event=store_request module=store status=error table={table} status_code={} error={message}",
            status.as_u16()
        );
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{OrderDirection, RestClient};
    use crate::store::{StoreConfig, StoreError};
    use reqwest::StatusCode;

    fn client() -> RestClient {
        RestClient::new(StoreConfig::new("https://example.supabase.co", "anon-key"))
    }

    #[test]
    fn endpoint_includes_rest_path_and_table() {
        assert_eq!(
            client().endpoint("crewmates"),
            "https://example.supabase.co/rest/v1/crewmates"
        );
    }

    #[test]
    fn builder_assembles_filter_and_order_grammar() {
        let client = client();
        let request = client
            .from("crewmates")
            .select("*")
            .eq("id", 7)
            .order("created_at", OrderDirection::Descending);

        assert_eq!(
            request.query,
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "eq.7".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
        assert!(!request.single);
        assert!(client.from("crewmates").single().single);
    }

    #[test]
    fn violated_single_row_request_maps_to_row_not_found() {
        let result = super::TableRequest::check_status(
            "crewmates",
            true,
            StatusCode::NOT_ACCEPTABLE,
            Some("{\"message\":\"JSON object requested, multiple (or no) rows returned\"}".to_string()),
        );
        assert!(matches!(result.unwrap_err(), StoreError::RowNotFound));
    }

    #[test]
    fn api_error_carries_backend_message() {
        let result = super::TableRequest::check_status(
            "crewmates",
            false,
            StatusCode::BAD_REQUEST,
            Some("{\"message\":\"invalid input syntax\"}".to_string()),
        );
        match result.unwrap_err() {
            StoreError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid input syntax");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
