//! Recent-history and statistics side panel.
//!
//! Both pieces are fetched independently. Failures here are low severity:
//! they are logged and never surface to the user.

use tracing::{Level, debug, warn};

use crate::{
    client::TourismApi,
    error::ApiError,
    model::{HistoryEntry, QueryStats},
};

#[derive(Debug, Default)]
pub struct HistoryPanel {
    history: Vec<HistoryEntry>,
    stats: Option<QueryStats>,
    place: Option<String>,
    loading: bool,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn stats(&self) -> Option<&QueryStats> {
        self.stats.as_ref()
    }

    /// Place the current list is filtered to, if any.
    pub fn place(&self) -> Option<&str> {
        self.place.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch recent history and stats concurrently.
    pub async fn refresh(&mut self, api: &dyn TourismApi, limit: u32) {
        self.loading = true;
        let (history, stats) =
            tokio::join!(fetch_history(api, limit, None, None), api.stats());

        self.place = None;
        self.apply_history(history, "history");
        self.apply_stats(stats);
        self.loading = false;
    }

    /// Replace the list with history for a single place. Stats are kept.
    pub async fn refresh_place(&mut self, api: &dyn TourismApi, place: &str, limit: u32) {
        self.loading = true;
        let result = fetch_history(api, limit, None, Some(place)).await;

        self.place = Some(place.to_owned());
        self.apply_history(result, "place history");
        self.loading = false;
    }

    fn apply_history(&mut self, result: Result<Vec<HistoryEntry>, ApiError>, what: &str) {
        match result {
            Ok(entries) => self.history = entries,
            Err(err) => {
                log_failure(what, &err);
                self.history.clear();
            }
        }
    }

    fn apply_stats(&mut self, result: Result<QueryStats, ApiError>) {
        match result {
            Ok(stats) => self.stats = Some(stats),
            // stale stats stay visible
            Err(err) => log_failure("stats", &err),
        }
    }
}

/// Recent history, or history for one place, never longer than `limit`.
///
/// `days` only applies to the unfiltered list.
pub async fn fetch_history(
    api: &dyn TourismApi,
    limit: u32,
    days: Option<u32>,
    place: Option<&str>,
) -> Result<Vec<HistoryEntry>, ApiError> {
    let mut entries = match place {
        Some(place) => api.place_history(place, limit).await?.history,
        None => api.history(limit, days).await?.history,
    };
    entries.truncate(limit as usize);
    Ok(entries)
}

/// A sleeping backend is expected; anything else is worth a warning.
fn failure_level(err: &ApiError) -> Level {
    if err.is_network() { Level::DEBUG } else { Level::WARN }
}

fn log_failure(what: &str, err: &ApiError) {
    if failure_level(err) == Level::DEBUG {
        debug!(error = %err, "failed to load {what}: backend unreachable");
    } else {
        warn!(error = %err, "failed to load {what}");
    }
}
