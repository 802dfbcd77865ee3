use mockito::{Matcher, Mock, Server, ServerGuard};
use serde::Serialize;
use zdungeon::client::data::RestClient;

pub const TEST_ANON_KEY: &str = "test-anon-key";

/// Mock backend server with a [`RestClient`] pointed at it
pub struct RestTest {
    pub server: ServerGuard,
    pub client: RestClient,
}

impl RestTest {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let client = RestClient::new(server.url(), TEST_ANON_KEY);

        Self { server, client }
    }

    /// Mocks `GET /rest/v1/{table}` answering with `rows`, matching any query
    pub async fn with_select_endpoint<T: Serialize>(
        &mut self,
        table: &str,
        rows: &T,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::to_string(rows).unwrap();

        self.with_select_response(table, Matcher::Any, 200, &body, expected_requests)
            .await
    }

    /// Mocks `GET /rest/v1/{table}` with a raw status & body for requests matching `query`
    pub async fn with_select_response(
        &mut self,
        table: &str,
        query: Matcher,
        status: usize,
        body: &str,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/rest/v1/{}", table);

        self.server
            .mock("GET", path.as_str())
            .match_query(query)
            .match_header("apikey", TEST_ANON_KEY)
            .match_header("authorization", format!("Bearer {}", TEST_ANON_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Mocks `POST /rest/v1/rpc/{function}` answering with `payload`
    pub async fn with_rpc_endpoint<T: Serialize>(
        &mut self,
        function: &str,
        payload: &T,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::to_string(payload).unwrap();

        self.with_rpc_response(function, 200, &body, expected_requests)
            .await
    }

    /// Mocks `POST /rest/v1/rpc/{function}` with a raw status & body
    pub async fn with_rpc_response(
        &mut self,
        function: &str,
        status: usize,
        body: &str,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/rest/v1/rpc/{}", function);

        self.server
            .mock("POST", path.as_str())
            .match_header("apikey", TEST_ANON_KEY)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create_async()
            .await
    }
}
