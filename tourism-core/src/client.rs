use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    config::ClientSettings,
    error::{ApiError, extract_detail},
    model::{
        HealthStatus, HistoryEnvelope, PlaceHistoryEnvelope, QueryStats, ServiceInfo,
        StatsEnvelope, TourismRequest, TourismResponse,
    },
};

pub const DEFAULT_PLACE_HISTORY_LIMIT: u32 = 5;

/// Typed call sites for the Tourism AI backend.
#[async_trait]
pub trait TourismApi: Send + Sync + Debug {
    /// Base URL the calls go to; used to phrase connection errors.
    fn base_url(&self) -> &str;

    async fn query(&self, request: &TourismRequest) -> Result<TourismResponse, ApiError>;

    async fn history(&self, limit: u32, days: Option<u32>) -> Result<HistoryEnvelope, ApiError>;

    async fn stats(&self) -> Result<QueryStats, ApiError>;

    async fn place_history(
        &self,
        place_name: &str,
        limit: u32,
    ) -> Result<PlaceHistoryEnvelope, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn service_info(&self) -> Result<ServiceInfo, ApiError>;
}

/// [`TourismApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTourismClient {
    base: Url,
    base_str: String,
    http: Client,
}

impl HttpTourismClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|e| ApiError::Other(format!("Invalid base URL '{}': {e}", settings.base_url)))?;

        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { base, base_str: settings.base_url.clone(), http })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Other(format!("Base URL '{}' cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let res = request.send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            debug!(%status, body = %truncate_body(&body), "backend returned an error status");
            return Err(ApiError::Server { status, detail: extract_detail(&body) });
        }

        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl TourismApi for HttpTourismClient {
    fn base_url(&self) -> &str {
        &self.base_str
    }

    async fn query(&self, request: &TourismRequest) -> Result<TourismResponse, ApiError> {
        let url = self.endpoint(&["query"])?;
        debug!(%url, query = %request.query, "submitting query");
        self.send(self.http.post(url).json(request)).await
    }

    async fn history(&self, limit: u32, days: Option<u32>) -> Result<HistoryEnvelope, ApiError> {
        let url = self.endpoint(&["history"])?;
        let mut params = vec![("limit", limit.to_string())];
        if let Some(days) = days {
            params.push(("days", days.to_string()));
        }
        debug!(%url, limit, ?days, "fetching history");
        self.send(self.http.get(url).query(&params)).await
    }

    async fn stats(&self) -> Result<QueryStats, ApiError> {
        let url = self.endpoint(&["history", "stats"])?;
        debug!(%url, "fetching stats");
        let envelope: StatsEnvelope = self.send(self.http.get(url)).await?;
        Ok(envelope.stats)
    }

    async fn place_history(
        &self,
        place_name: &str,
        limit: u32,
    ) -> Result<PlaceHistoryEnvelope, ApiError> {
        let url = self.endpoint(&["history", "place", place_name])?;
        debug!(%url, limit, "fetching place history");
        self.send(self.http.get(url).query(&[("limit", limit)])).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"])?;
        self.send(self.http.get(url)).await
    }

    async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        let url = self.endpoint(&[])?;
        self.send(self.http.get(url)).await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpTourismClient {
        HttpTourismClient::new(&ClientSettings { base_url: base.into(), ..Default::default() })
            .unwrap()
    }

    #[test]
    fn endpoint_joins_onto_root() {
        let c = client("http://localhost:8000");
        assert_eq!(c.endpoint(&["history", "stats"]).unwrap().as_str(), "http://localhost:8000/history/stats");
        assert_eq!(c.endpoint(&[]).unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let c = client("https://example.com/api");
        assert_eq!(c.endpoint(&["query"]).unwrap().as_str(), "https://example.com/api/query");
    }

    #[test]
    fn endpoint_encodes_place_names() {
        let c = client("http://localhost:8000");
        let url = c.endpoint(&["history", "place", "São Paulo/Centro"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/history/place/S%C3%A3o%20Paulo%2FCentro");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpTourismClient::new(&ClientSettings {
            base_url: "nope".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }
}
