//! Core library for the `tourism` CLI.
//!
//! This crate defines:
//! - Startup configuration (backend base URL, timeout)
//! - The HTTP client for the Tourism AI backend, behind [`TourismApi`]
//! - Wire DTOs for queries, history and stats
//! - The view-model shared by every front end: query session, results view,
//!   history/stats panel and their plain-text rendering

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod panel;
pub mod render;
pub mod session;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::{HttpTourismClient, TourismApi};
pub use config::{ClientSettings, Config};
pub use error::ApiError;
pub use model::{
    HealthStatus, HistoryEntry, PlaceInfo, QueryStats, TourismRequest, TourismResponse,
    WeatherSnapshot,
};
pub use panel::HistoryPanel;
pub use session::{QuerySession, QueryState};
pub use view::ResultsView;
