use crate::{
    model::{PlaceInfo, TourismResponse, WeatherSnapshot},
    session::{QuerySession, QueryState},
};

/// What the results panel should show. Derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView<'a> {
    Loading,
    Empty,
    Error {
        message: &'a str,
    },
    Success {
        weather: Option<&'a WeatherSnapshot>,
        places: &'a [PlaceInfo],
        message: &'a str,
    },
}

impl<'a> ResultsView<'a> {
    pub fn from_state(state: &'a QueryState) -> Self {
        match state {
            QueryState::Empty => ResultsView::Empty,
            QueryState::Loading => ResultsView::Loading,
            QueryState::Done(resp) => Self::from_response(resp),
        }
    }

    pub fn from_session(session: &'a QuerySession) -> Self {
        Self::from_state(session.state())
    }

    /// The error branch keys off the `error` field: `success=false` with
    /// no error code still renders as a regular result.
    pub fn from_response(resp: &'a TourismResponse) -> Self {
        match (&resp.error, resp.success) {
            (Some(code), false) => ResultsView::Error {
                message: if resp.message.is_empty() { code.as_str() } else { resp.message.as_str() },
            },
            _ => ResultsView::Success {
                weather: resp.weather.as_ref(),
                places: resp.places(),
                message: &resp.message,
            },
        }
    }

    /// Stricter reading for one-shot output: any `error` field is an error,
    /// and so is a result whose weather and places are both absent. An
    /// empty places list still counts as an answer.
    pub fn strict(resp: &'a TourismResponse) -> Self {
        if let Some(code) = &resp.error {
            return ResultsView::Error {
                message: if resp.message.is_empty() { code.as_str() } else { resp.message.as_str() },
            };
        }

        if resp.weather.is_none() && resp.places.is_none() {
            return ResultsView::Error {
                message: if resp.message.is_empty() { "No results found" } else { resp.message.as_str() },
            };
        }

        Self::from_response(resp)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultsView::Error { .. })
    }
}
