//! Request/response lifecycle of a single query submission.

use tracing::{debug, warn};

use crate::{
    client::TourismApi,
    error::ApiError,
    model::{TourismRequest, TourismResponse},
};

/// Where the current submission stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    /// Nothing submitted yet.
    #[default]
    Empty,
    Loading,
    Done(TourismResponse),
}

#[derive(Debug, Default)]
pub struct QuerySession {
    state: QueryState,
    error: Option<String>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    pub fn response(&self) -> Option<&TourismResponse> {
        match &self.state {
            QueryState::Done(resp) => Some(resp),
            _ => None,
        }
    }

    /// Display message of the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching state when the trimmed text is empty
    /// or another submission is still loading.
    pub fn begin(&mut self, text: &str, place: Option<&str>) -> Option<TourismRequest> {
        let query = text.trim();
        if query.is_empty() || self.is_loading() {
            return None;
        }

        self.state = QueryState::Loading;
        self.error = None;

        let place = place.map(str::trim).filter(|p| !p.is_empty()).map(str::to_owned);
        Some(TourismRequest { query: query.to_owned(), place })
    }

    /// Complete the in-flight submission.
    pub fn finish(&mut self, result: Result<TourismResponse, ApiError>, base_url: &str) {
        match result {
            Ok(response) => {
                debug!(success = response.success, "query completed");
                self.state = QueryState::Done(response);
            }
            Err(err) => {
                warn!(error = %err, "query failed");
                let message = err.user_message(base_url);
                self.state = QueryState::Done(TourismResponse::failure(message.clone()));
                self.error = Some(message);
            }
        }
    }

    /// Validate, send exactly one request and record the outcome.
    ///
    /// Returns `false` when the input was rejected and nothing was sent.
    pub async fn submit(&mut self, api: &dyn TourismApi, text: &str, place: Option<&str>) -> bool {
        self.submit_with(api, text, place, |_| {}).await
    }

    /// Like [`QuerySession::submit`], calling `on_loading` once the session
    /// has entered the loading state and before the request goes out.
    pub async fn submit_with(
        &mut self,
        api: &dyn TourismApi,
        text: &str,
        place: Option<&str>,
        on_loading: impl FnOnce(&QuerySession),
    ) -> bool {
        let Some(request) = self.begin(text, place) else {
            return false;
        };
        on_loading(self);

        let result = api.query(&request).await;
        self.finish(result, api.base_url());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;

    #[test]
    fn blank_input_is_a_noop() {
        let mut session = QuerySession::new();
        assert!(session.begin("   \n\t", None).is_none());
        assert_eq!(session.state(), &QueryState::Empty);
    }

    #[test]
    fn begin_trims_and_enters_loading() {
        let mut session = QuerySession::new();
        let req = session.begin("  Bangalore weather ", Some("  ")).unwrap();

        assert_eq!(req, TourismRequest::new("Bangalore weather"));
        assert!(session.is_loading());
        assert!(session.response().is_none());
    }

    #[test]
    fn second_submission_while_loading_is_rejected() {
        let mut session = QuerySession::new();
        assert!(session.begin("first", None).is_some());
        assert!(session.begin("second", None).is_none());
    }

    #[test]
    fn failure_clears_on_next_begin() {
        let mut session = QuerySession::new();
        session.begin("x", None);
        session.finish(Err(ApiError::Other("bad".into())), "http://h");
        assert_eq!(session.error(), Some("bad"));

        session.begin("y", None);
        assert_eq!(session.error(), None);
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn submit_sends_exactly_one_request() {
        let api = StubApi::default().with_query(Ok(StubApi::bangalore()));
        let mut session = QuerySession::new();

        assert!(session.submit(&api, "Bangalore weather", None).await);

        assert_eq!(api.query_calls(), 1);
        assert_eq!(session.response(), Some(&StubApi::bangalore()));
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
    }

    #[tokio::test]
    async fn loading_hook_sees_loading_state() {
        let api = StubApi::default().with_query(Ok(StubApi::bangalore()));
        let mut session = QuerySession::new();
        let mut seen = Vec::new();

        let sent = session
            .submit_with(&api, "Bangalore weather", None, |s| seen.push(s.is_loading()))
            .await;

        assert!(sent);
        assert_eq!(seen, vec![true]);
        assert_eq!(api.query_calls(), 1);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn loading_hook_skipped_for_blank_input() {
        let api = StubApi::default();
        let mut session = QuerySession::new();
        let mut called = false;

        assert!(!session.submit_with(&api, " ", None, |_| called = true).await);
        assert!(!called);
        assert_eq!(api.query_calls(), 0);
    }

    #[tokio::test]
    async fn submit_ignores_whitespace() {
        let api = StubApi::default();
        let mut session = QuerySession::new();

        assert!(!session.submit(&api, "   ", None).await);
        assert_eq!(api.query_calls(), 0);
        assert_eq!(session.state(), &QueryState::Empty);
    }

    #[tokio::test]
    async fn unreachable_backend_yields_failure_response() {
        let api = StubApi::default().with_query(Err(ApiError::Network("refused".into())));
        let mut session = QuerySession::new();

        session.submit(&api, "Bangalore weather", None).await;

        let resp = session.response().expect("failure response is synthesized");
        assert!(!resp.success);
        assert!(resp.message.contains("Make sure the backend server is running"));
        assert_eq!(session.error(), Some(resp.message.as_str()));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn server_detail_becomes_message() {
        let api = StubApi::default().with_query(Err(ApiError::Server {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            detail: Some("Internal server error: boom".into()),
        }));
        let mut session = QuerySession::new();

        session.submit(&api, "anything", None).await;
        assert_eq!(session.response().map(|r| r.message.as_str()), Some("Internal server error: boom"));
    }
}
