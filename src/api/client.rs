//! HTTP client for the library REST API.
//!
//! Every request carries `Authorization: Bearer <token>` when a token is
//! stored. A 401 from any endpoint ends the local session: token and user
//! are removed from the store and the navigator is sent to `/login`.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ApiConfig,
    error::{extract_message, AppError, AppResult, GENERIC_FAILURE},
    router::Navigator,
    session::store::SessionStore,
};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<Navigator>,
    ) -> AppResult<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "API request");
        let builder = self.http.request(method, self.url(path));
        match self.store.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn non-success statuses into errors.
    ///
    /// Any 401 ends the local session. An anonymous request (a login) keeps
    /// the server's message so the rejection can be classified.
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let authenticated = self.store.token().is_some();
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Request rejected as unauthorized, clearing session");
            if let Err(e) = self.store.clear() {
                tracing::error!("Failed to clear session: {}", e);
            }
            self.navigator.redirect("/login");
            if authenticated {
                return Err(AppError::Unauthorized);
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_message(&body, GENERIC_FAILURE);
            tracing::warn!(status = status.as_u16(), "API error: {}", message);
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send and discard whatever the server answered
    async fn execute(&self, builder: RequestBuilder) -> AppResult<()> {
        self.send(builder).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.decode(self.request(Method::GET, path)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.decode(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.decode(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// POST without a body, parameters in the query string
    pub async fn post_query<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> AppResult<()> {
        self.execute(self.request(Method::POST, path).query(query)).await
    }

    pub async fn post_empty(&self, path: &str) -> AppResult<()> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.decode(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_empty(&self, path: &str) -> AppResult<()> {
        self.execute(self.request(Method::PUT, path)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemorySessionStore;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let config = ApiConfig {
            base_url: "http://example.test/api/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(
            &config,
            Arc::new(MemorySessionStore::new()),
            Arc::new(Navigator::default()),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.url("/books/1"), "http://example.test/api/books/1");
    }
}
