//! In-memory [`TourismApi`] for unit tests.

use async_trait::async_trait;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    client::TourismApi,
    error::ApiError,
    model::{
        HealthStatus, HistoryEntry, HistoryEnvelope, PlaceHistoryEnvelope, QueryStats,
        ServiceInfo, TourismRequest, TourismResponse, WeatherSnapshot,
    },
};

type Slot<T> = Mutex<Option<Result<T, ApiError>>>;

/// Each endpoint answers once with whatever was queued; unqueued calls fail.
#[derive(Debug, Default)]
pub struct StubApi {
    query: Slot<TourismResponse>,
    history: Slot<Vec<HistoryEntry>>,
    stats: Slot<QueryStats>,
    place_history: Slot<Vec<HistoryEntry>>,
    query_calls: AtomicUsize,
    last_history_limit: Mutex<Option<u32>>,
}

impl StubApi {
    pub fn with_query(self, result: Result<TourismResponse, ApiError>) -> Self {
        *self.query.lock().unwrap() = Some(result);
        self
    }

    pub fn with_history(self, result: Result<Vec<HistoryEntry>, ApiError>) -> Self {
        *self.history.lock().unwrap() = Some(result);
        self
    }

    pub fn with_stats(self, result: Result<QueryStats, ApiError>) -> Self {
        *self.stats.lock().unwrap() = Some(result);
        self
    }

    pub fn with_place_history(self, result: Result<Vec<HistoryEntry>, ApiError>) -> Self {
        *self.place_history.lock().unwrap() = Some(result);
        self
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn last_history_limit(&self) -> Option<u32> {
        *self.last_history_limit.lock().unwrap()
    }

    pub fn bangalore() -> TourismResponse {
        TourismResponse {
            place_name: Some("Bangalore".into()),
            weather: Some(WeatherSnapshot {
                temperature: 27.0,
                rain_probability: 10.0,
                place_name: "Bangalore".into(),
            }),
            places: None,
            message: "In Bangalore it's currently 27°C with a chance of 10% to rain.".into(),
            error: None,
            success: true,
        }
    }

    pub fn entries(n: usize) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| HistoryEntry {
                id: i as i64 + 1,
                query: format!("query #{}", i + 1),
                place_name: Some("Bangalore".into()),
                user_ip: None,
                has_weather: true,
                has_places: i % 2 == 0,
                weather_temp: Some(27.0),
                weather_rain_prob: Some(10.0),
                places_count: if i % 2 == 0 { 5 } else { 0 },
                error: None,
                success: true,
                created_at: "2024-05-01T10:15:30.123456".into(),
            })
            .collect()
    }

    pub fn stats() -> QueryStats {
        QueryStats { total_queries: 42, successful_queries: 40, unique_places: 7 }
    }
}

fn take<T>(slot: &Slot<T>, what: &str) -> Result<T, ApiError> {
    slot.lock()
        .unwrap()
        .take()
        .unwrap_or_else(|| Err(ApiError::Other(format!("{what} not stubbed"))))
}

#[async_trait]
impl TourismApi for StubApi {
    fn base_url(&self) -> &str {
        "http://localhost:8000"
    }

    async fn query(&self, _request: &TourismRequest) -> Result<TourismResponse, ApiError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        take(&self.query, "query")
    }

    async fn history(&self, limit: u32, _days: Option<u32>) -> Result<HistoryEnvelope, ApiError> {
        *self.last_history_limit.lock().unwrap() = Some(limit);
        let history = take(&self.history, "history")?;
        Ok(HistoryEnvelope { success: true, count: history.len(), history })
    }

    async fn stats(&self) -> Result<QueryStats, ApiError> {
        take(&self.stats, "stats")
    }

    async fn place_history(
        &self,
        place_name: &str,
        _limit: u32,
    ) -> Result<PlaceHistoryEnvelope, ApiError> {
        let history = take(&self.place_history, "place history")?;
        Ok(PlaceHistoryEnvelope {
            success: true,
            place_name: place_name.to_owned(),
            count: history.len(),
            history,
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus {
            status: "healthy".into(),
            service: Some("tourism-ai-system".into()),
            version: Some("1.0.0".into()),
            error: None,
        })
    }

    async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        Err(ApiError::Other("service info not stubbed".into()))
    }
}
