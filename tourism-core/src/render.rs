//! Plain-text rendering of the view-model, shared by every front end.

use std::fmt::Write;

use crate::{
    model::{HealthStatus, HistoryEntry, PlaceInfo, QueryStats, ServiceInfo, WeatherSnapshot},
    panel::HistoryPanel,
    view::ResultsView,
};

pub fn results(view: &ResultsView<'_>) -> String {
    match view {
        ResultsView::Loading => "Processing your query...\n".to_string(),
        ResultsView::Empty => "Enter a query above to get tourism information.\n".to_string(),
        ResultsView::Error { message } => format!("Error\n  {message}\n"),
        ResultsView::Success { weather, places, message } => {
            let mut out = String::new();
            if let Some(weather) = weather {
                out.push_str(&weather_section(weather));
                out.push('\n');
            }
            if !places.is_empty() {
                out.push_str(&places_section(places));
                out.push('\n');
            }
            let _ = writeln!(out, "Response\n  {message}");
            out
        }
    }
}

pub fn weather_section(weather: &WeatherSnapshot) -> String {
    format!(
        "Weather Information\n  Temperature: {}°C\n  Rain Probability: {}%\n",
        number(weather.temperature),
        number(weather.rain_probability),
    )
}

pub fn places_section(places: &[PlaceInfo]) -> String {
    let mut out = String::from("Tourist Attractions\n");
    for place in places {
        let _ = write!(out, "  - {}", place.name);
        if !place.kind.is_empty() {
            let _ = write!(out, " ({})", place.kind);
        }
        out.push('\n');
        if let Some(description) = place.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "      {description}");
        }
    }
    out
}

pub fn stats(stats: &QueryStats) -> String {
    format!(
        "Statistics\n  Total Queries: {}\n  Successful:    {}\n  Unique Places: {}\n",
        stats.total_queries, stats.successful_queries, stats.unique_places,
    )
}

pub fn history_entry(entry: &HistoryEntry) -> String {
    let mark = if entry.success { '✓' } else { '✗' };
    let mut out = format!("  {mark} {}\n", entry.query);

    if let Some(place) = &entry.place_name {
        let _ = write!(out, "      @ {place}");
        if entry.has_weather {
            out.push_str(" [weather]");
        }
        if entry.has_places {
            let _ = write!(out, " [{} places]", entry.places_count);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "      {}", entry.display_time());
    out
}

pub fn history(entries: &[HistoryEntry], place: Option<&str>) -> String {
    let mut out = match place {
        Some(place) => format!("Recent Queries for {place}\n"),
        None => String::from("Recent Queries\n"),
    };

    if entries.is_empty() {
        out.push_str("  No query history yet.\n");
    }
    for entry in entries {
        out.push_str(&history_entry(entry));
    }
    out
}

pub fn panel(panel: &HistoryPanel) -> String {
    if panel.is_loading() {
        return "Loading history...\n".to_string();
    }

    let mut out = String::new();
    if let Some(s) = panel.stats() {
        out.push_str(&stats(s));
        out.push('\n');
    }
    out.push_str(&history(panel.history(), panel.place()));
    out
}

pub fn health(base_url: &str, health: &HealthStatus) -> String {
    let mut out = format!("{base_url}: {}", health.status);
    if let Some(service) = &health.service {
        let _ = write!(out, " ({service}");
        if let Some(version) = &health.version {
            let _ = write!(out, " v{version}");
        }
        out.push(')');
    }
    if let Some(error) = &health.error {
        let _ = write!(out, ": {error}");
    }
    out.push('\n');
    out
}

pub fn service_info(info: &ServiceInfo) -> String {
    let mut out = info.message.clone();
    if let Some(version) = &info.version {
        let _ = write!(out, " v{version}");
    }
    out.push('\n');
    for (path, description) in &info.endpoints {
        let _ = writeln!(out, "  {path:<28} {description}");
    }
    out
}

/// Whole numbers print without a fractional part.
fn number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
