//! PostgREST-style query client. Implements QueryPort over `{base}/rest/v1`.
//!
//! Filters become `col=eq.value` / `col=is.null` query params, ordering
//! `order=col.asc|desc`, writes ask for `Prefer: return=representation` so the
//! stored row comes back in the same round trip.

use crate::domain::DomainError;
use crate::ports::{Filter, QueryPort, SelectQuery, value_literal};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const RETURN_REPRESENTATION: &str = "return=representation";

/// Query client for a hosted PostgREST endpoint.
pub struct RestQueryClient {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl RestQueryClient {
    /// Create a client for `base_url` (project root, without `/rest/v1`).
    ///
    /// # Arguments
    /// * `base_url` - Backend project URL
    /// * `api_key` - Key sent as `apikey` header and bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|filter| match filter {
                Filter::Eq {
                    column,
                    value: Value::Null,
                }
                | Filter::IsNull { column } => (column.clone(), "is.null".to_string()),
                Filter::Eq { column, value } => {
                    (column.clone(), format!("eq.{}", value_literal(value)))
                }
            })
            .collect()
    }

    fn select_params(query: &SelectQuery) -> Vec<(String, String)> {
        let columns = if query.columns.is_empty() {
            "*".to_string()
        } else {
            query.columns.join(",")
        };
        let mut params = vec![("select".to_string(), columns)];
        params.extend(Self::filter_params(&query.filters));
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Check status and parse the JSON array body.
    async fn rows(table: &str, response: Response) -> Result<Vec<Value>, DomainError> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(table, status = %status, body = %text, "backend rejected request");
            return Err(DomainError::Backend(format!(
                "{} returned {}: {}",
                table,
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| DomainError::Decode(format!("{}: response body: {}", table, e)))
    }
}

#[async_trait::async_trait]
impl QueryPort for RestQueryClient {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, DomainError> {
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&Self::select_params(query))
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("{} select failed: {}", table, e)))?;

        let rows = Self::rows(table, response).await?;
        debug!(table, count = rows.len(), "selected rows");
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, DomainError> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&row)
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("{} insert failed: {}", table, e)))?;

        Self::rows(table, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Backend(format!("{} insert returned no row", table)))
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<Vec<Value>, DomainError> {
        let response = self
            .authorized(self.client.patch(self.table_url(table)))
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&Self::filter_params(filters))
            .json(&patch)
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("{} update failed: {}", table, e)))?;

        Self::rows(table, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> RestQueryClient {
        RestQueryClient::new(&server.uri(), "anon-key".into(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_select_params() {
        let query = SelectQuery::new()
            .eq("status", "open")
            .eq("likes", 3)
            .filter(Filter::is_null("reason"))
            .order_by("created_at", false)
            .limit(20);

        let params = RestQueryClient::select_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.open".to_string()),
                ("likes".to_string(), "eq.3".to_string()),
                ("reason".to_string(), "is.null".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_params_projection() {
        let query = SelectQuery::new().columns(["likes", "comment_count"]);
        let params = RestQueryClient::select_params(&query);
        assert_eq!(params[0], ("select".to_string(), "likes,comment_count".to_string()));
    }

    #[test]
    fn test_null_eq_becomes_is_null() {
        let params = RestQueryClient::filter_params(&[Filter::eq("likes", Value::Null)]);
        assert_eq!(params, vec![("likes".to_string(), "is.null".to_string())]);
    }

    #[tokio::test]
    async fn test_select_sends_query_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("type", "eq.event"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "5"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "p1" }])))
            .expect(1)
            .mount(&server)
            .await;

        let query = SelectQuery::new()
            .eq("type", "event")
            .order_by("created_at", false)
            .limit(5);
        let rows = client(&server).select("posts", &query).await.unwrap();

        assert_eq!(rows, vec![json!({ "id": "p1" })]);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/exchange_comments"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(json!({ "content": "hi" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([{ "id": 17, "content": "hi" }])),
            )
            .mount(&server)
            .await;

        let row = client(&server)
            .insert("exchange_comments", json!({ "content": "hi" }))
            .await
            .unwrap();

        assert_eq!(row["id"], 17);
    }

    #[tokio::test]
    async fn test_update_filters_by_params() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/course_exchanges"))
            .and(query_param("id", "eq.ex-1"))
            .and(query_param("likes", "eq.4"))
            .and(body_json(json!({ "likes": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let updated = client(&server)
            .update(
                "course_exchanges",
                &[Filter::eq("id", "ex-1"), Filter::eq("likes", 4)],
                json!({ "likes": 5 }),
            )
            .await
            .unwrap();

        assert!(updated.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_maps_to_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/course_teaming"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client(&server)
            .select("course_teaming", &SelectQuery::new())
            .await
            .unwrap_err();

        match err {
            DomainError::Backend(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_backend_error() {
        let client = RestQueryClient::new(
            "http://127.0.0.1:9",
            "anon-key".into(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.select("posts", &SelectQuery::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::Backend(_)));
    }
}
