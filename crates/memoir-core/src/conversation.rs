//! Conversation state: the message history, in-flight guard, and the
//! character-by-character reveal of assistant answers.

/// Shown when the backend answered without a usable answer field.
pub const NO_ANSWER_FALLBACK: &str =
    "I apologize, but I couldn't process your request. Please try again.";

/// Shown when the query failed outright (network error or bad status).
pub const ERROR_FALLBACK: &str = "I'm sorry, I encountered an error. Please try again later.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Immutable once appended.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Progress of the reveal animation on the last message.
#[derive(Debug)]
struct Reveal {
    /// Characters shown so far
    revealed: usize,
    /// Character count of the message under reveal
    total: usize,
}

/// Append-only conversation history with a single-turn in-flight guard.
///
/// Per turn the state moves `Idle -> AwaitingResponse -> (Idle | Revealing)
/// -> Idle`. While a turn is in flight (awaiting or revealing), new
/// submissions are rejected. The reveal is cosmetic: `messages` always
/// stores full content, and [`Conversation::visible_content`] applies the
/// revealed prefix for display.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    reveal: Option<Reveal>,
    awaiting_response: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full history, insertion order = display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True between submitting a query and its resolution.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// True while an answer is still being revealed.
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// True while a turn is in flight in either phase.
    pub fn is_busy(&self) -> bool {
        self.awaiting_response || self.reveal.is_some()
    }

    /// Start a turn. Appends the user message and returns the trimmed
    /// query for the caller to issue, or `None` (no state change) when the
    /// input trims to empty or a turn is already in flight.
    ///
    /// The user message is appended before the caller can issue the query,
    /// which is the one ordering contract the conversation guarantees.
    pub fn begin_turn(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_busy() {
            return None;
        }

        self.messages.push(Message::user(trimmed));
        self.awaiting_response = true;
        Some(trimmed.to_string())
    }

    /// Complete the in-flight turn with the backend's answer. Appends one
    /// assistant message (the no-answer fallback when the answer is absent
    /// or blank) and starts its reveal.
    pub fn resolve(&mut self, answer: Option<String>) {
        let content = match answer {
            Some(a) if !a.trim().is_empty() => a,
            _ => NO_ANSWER_FALLBACK.to_string(),
        };
        let total = content.chars().count();

        self.messages.push(Message::assistant(content));
        self.reveal = Some(Reveal { revealed: 0, total });
        self.awaiting_response = false;
    }

    /// Complete the in-flight turn after a failed query. Appends the error
    /// fallback as an ordinary, non-revealed assistant message. The
    /// conversation is immediately usable again.
    pub fn fail(&mut self) {
        self.messages.push(Message::assistant(ERROR_FALLBACK));
        self.awaiting_response = false;
    }

    /// Advance the reveal by one character. Clears the reveal once the
    /// full content is shown. Returns whether a reveal is still running;
    /// ticks without an active reveal are no-ops.
    pub fn reveal_tick(&mut self) -> bool {
        let Some(reveal) = self.reveal.as_mut() else {
            return false;
        };

        reveal.revealed += 1;
        if reveal.revealed >= reveal.total {
            self.reveal = None;
            return false;
        }
        true
    }

    /// Content of message `index` as it should be displayed right now:
    /// the revealed prefix for the message under reveal, full content for
    /// every other message.
    pub fn visible_content(&self, index: usize) -> &str {
        let msg = &self.messages[index];

        // The reveal always refers to the last message.
        if index + 1 == self.messages.len() {
            if let Some(reveal) = &self.reveal {
                let end = msg
                    .content
                    .char_indices()
                    .nth(reveal.revealed)
                    .map(|(i, _)| i)
                    .unwrap_or(msg.content.len());
                return &msg.content[..end];
            }
        }

        &msg.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_turn_appends_trimmed_user_message() {
        let mut conv = Conversation::new();
        let query = conv.begin_turn("  How am I feeling this week?  ");

        assert_eq!(query.as_deref(), Some("How am I feeling this week?"));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].role, Role::User);
        assert_eq!(conv.messages()[0].content, "How am I feeling this week?");
        assert!(conv.is_awaiting_response());
    }

    #[test]
    fn test_begin_turn_rejects_blank_input() {
        let mut conv = Conversation::new();
        assert!(conv.begin_turn("").is_none());
        assert!(conv.begin_turn("   \t\n").is_none());
        assert!(conv.messages().is_empty());
        assert!(!conv.is_awaiting_response());
    }

    #[test]
    fn test_begin_turn_rejects_while_awaiting() {
        let mut conv = Conversation::new();
        conv.begin_turn("first").unwrap();

        assert!(conv.begin_turn("test").is_none());
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn test_begin_turn_rejects_while_revealing() {
        let mut conv = Conversation::new();
        conv.begin_turn("first").unwrap();
        conv.resolve(Some("A long answer".to_string()));

        assert!(conv.is_revealing());
        assert!(conv.begin_turn("second").is_none());
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_resolve_appends_answer_and_starts_reveal() {
        let mut conv = Conversation::new();
        conv.begin_turn("How am I feeling this week?").unwrap();
        conv.resolve(Some("You've been mostly positive.".to_string()));

        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].role, Role::Assistant);
        assert_eq!(conv.messages()[1].content, "You've been mostly positive.");
        assert!(!conv.is_awaiting_response());
        assert!(conv.is_revealing());
        assert_eq!(conv.visible_content(1), "");
    }

    #[test]
    fn test_resolve_without_answer_uses_fallback() {
        let mut conv = Conversation::new();
        conv.begin_turn("anything").unwrap();
        conv.resolve(None);
        assert_eq!(conv.messages()[1].content, NO_ANSWER_FALLBACK);

        // Blank answers count as missing too.
        let mut conv = Conversation::new();
        conv.begin_turn("anything").unwrap();
        conv.resolve(Some("   ".to_string()));
        assert_eq!(conv.messages()[1].content, NO_ANSWER_FALLBACK);
    }

    #[test]
    fn test_fail_appends_error_fallback_without_reveal() {
        let mut conv = Conversation::new();
        conv.begin_turn("anything").unwrap();
        conv.fail();

        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].content, ERROR_FALLBACK);
        assert!(!conv.is_awaiting_response());
        assert!(!conv.is_revealing());
        assert_eq!(conv.visible_content(1), ERROR_FALLBACK);

        // Usable again right away.
        assert!(conv.begin_turn("retry").is_some());
    }

    #[test]
    fn test_reveal_terminates_after_content_length_ticks() {
        let mut conv = Conversation::new();
        conv.begin_turn("q").unwrap();
        conv.resolve(Some("hello".to_string()));

        let mut prefixes = Vec::new();
        let mut ticks = 0;
        loop {
            let more = conv.reveal_tick();
            ticks += 1;
            prefixes.push(conv.visible_content(1).to_string());
            if !more {
                break;
            }
        }

        assert_eq!(ticks, 5);
        assert_eq!(prefixes, vec!["h", "he", "hel", "hell", "hello"]);
        assert!(!conv.is_revealing());

        // Further ticks are no-ops.
        assert!(!conv.reveal_tick());
        assert_eq!(conv.visible_content(1), "hello");
    }

    #[test]
    fn test_reveal_counts_characters_not_bytes() {
        let mut conv = Conversation::new();
        conv.begin_turn("q").unwrap();
        conv.resolve(Some("héllo".to_string()));

        conv.reveal_tick();
        conv.reveal_tick();
        assert_eq!(conv.visible_content(1), "hé");
    }

    #[test]
    fn test_full_turn_scenario() {
        let mut conv = Conversation::new();
        conv.begin_turn("How am I feeling this week?").unwrap();
        conv.resolve(Some("You've been mostly positive.".to_string()));

        while conv.reveal_tick() {}

        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.visible_content(0), "How am I feeling this week?");
        assert_eq!(conv.visible_content(1), "You've been mostly positive.");
        assert!(!conv.is_awaiting_response());
        assert!(!conv.is_revealing());
    }
}
