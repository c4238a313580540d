//! The seam between the conversation and the backend's query endpoint.

use crate::conversation::Conversation;
use async_trait::async_trait;
use memoir_api::DiaryClient;
use tracing::warn;

/// Something that can answer a free-text question about the diary.
///
/// Implemented by [`DiaryClient`] for real use and by scripted mocks in
/// tests.
#[async_trait]
pub trait QueryService {
    /// Ask a question. `Ok(None)` means the service responded but had no
    /// usable answer.
    async fn analyze(&self, query: &str) -> memoir_api::Result<Option<String>>;
}

#[async_trait]
impl QueryService for DiaryClient {
    async fn analyze(&self, query: &str) -> memoir_api::Result<Option<String>> {
        DiaryClient::analyze(self, query).await
    }
}

/// Drive one full turn: guard and append the user message, issue the
/// query, then resolve or fail the conversation. Returns whether a turn
/// actually ran (false when the input was rejected by the guard).
///
/// Failures are not propagated; they degrade into the error fallback
/// message per the conversation's failure policy.
pub async fn run_turn<S>(conversation: &mut Conversation, service: &S, text: &str) -> bool
where
    S: QueryService + ?Sized,
{
    let Some(query) = conversation.begin_turn(text) else {
        return false;
    };

    match service.analyze(&query).await {
        Ok(answer) => conversation.resolve(answer),
        Err(e) => {
            warn!(error = %e, "assistant query failed");
            conversation.fail();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ERROR_FALLBACK, NO_ANSWER_FALLBACK, Role};
    use std::sync::Mutex;

    /// Scripted service that records every query it receives.
    struct MockService {
        answer: Option<String>,
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl MockService {
        fn answering(answer: &str) -> Self {
            Self {
                answer: Some(answer.to_string()),
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                answer: None,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                fail: true,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QueryService for MockService {
        async fn analyze(&self, query: &str) -> memoir_api::Result<Option<String>> {
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(memoir_api::Error::status(500, "internal error"));
            }
            Ok(self.answer.clone())
        }
    }

    #[tokio::test]
    async fn test_user_message_appended_before_query_issued() {
        let mut conv = Conversation::new();
        let service = MockService::answering("You've been mostly positive.");

        let ran = run_turn(&mut conv, &service, "  How am I feeling this week?  ").await;

        assert!(ran);
        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["How am I feeling this week?"]);
        assert_eq!(conv.messages()[0].role, Role::User);
        assert_eq!(conv.messages()[1].content, "You've been mostly positive.");
    }

    #[tokio::test]
    async fn test_blank_input_issues_no_query() {
        let mut conv = Conversation::new();
        let service = MockService::answering("unused");

        assert!(!run_turn(&mut conv, &service, "   ").await);
        assert!(service.seen.lock().unwrap().is_empty());
        assert!(conv.messages().is_empty());
    }

    #[tokio::test]
    async fn test_missing_answer_becomes_fallback() {
        let mut conv = Conversation::new();
        let service = MockService::empty();

        run_turn(&mut conv, &service, "anything").await;

        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].content, NO_ANSWER_FALLBACK);
        assert!(conv.is_revealing());
    }

    #[tokio::test]
    async fn test_service_failure_becomes_error_message() {
        let mut conv = Conversation::new();
        let service = MockService::failing();

        run_turn(&mut conv, &service, "anything").await;

        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].content, ERROR_FALLBACK);
        assert!(!conv.is_awaiting_response());
        assert!(!conv.is_revealing());

        // The next turn goes through immediately.
        let service = MockService::answering("better now");
        assert!(run_turn(&mut conv, &service, "again").await);
        assert_eq!(conv.messages().len(), 4);
    }
}
