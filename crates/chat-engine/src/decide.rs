//! Keyword heuristics that pick the assistant reply for one message.

const CONFIRM_SAVED: &str =
    "✅ I've saved that to your memory! I'll remember this for future conversations.";
const NOTHING_STORED: &str =
    "🤔 I don't have any relevant memories stored yet. Try telling me something to remember!";
const GREETING: &str = "👋 Hello! I'm your memory-enabled chatbot. Try telling me something to remember, or ask me what I know about you!";
const TEST_ACK: &str = "🧪 Great! This is a test of the memory system. I can store and retrieve memories across our conversation. Tell me something interesting to remember!";
const AUTO_SAVED_SUFFIX: &str =
    "\n\n✨ I automatically saved this as it seems like useful information!";

/// Tokens above which an unprompted statement is treated as worth keeping.
const AUTO_SAVE_MIN_TOKENS: usize = 5;

/// How many characters of the top memory are quoted back in context replies.
const MEMORY_PREVIEW_CHARS: usize = 100;

/// Outcome of the reply decision: the reply text and, when the turn should
/// persist something, the exact content to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDecision {
    pub reply: String,
    pub memory_write: Option<String>,
}

impl ReplyDecision {
    fn reply_only(reply: String) -> Self {
        Self {
            reply,
            memory_write: None,
        }
    }
}

/// Decide the assistant reply for `message` given the recalled memories.
///
/// Matching is case-insensitive substring matching, evaluated in strict
/// priority order; the first matching rule wins. At most one memory write is
/// requested per decision.
pub fn decide_reply(message: &str, relevant_memories: &[String]) -> ReplyDecision {
    let lower = message.to_lowercase();

    if lower.contains("remember") || lower.contains("save") {
        return ReplyDecision {
            reply: CONFIRM_SAVED.to_string(),
            memory_write: Some(message.to_string()),
        };
    }

    if lower.contains("what do you know") || lower.contains("recall") {
        let reply = if relevant_memories.is_empty() {
            NOTHING_STORED.to_string()
        } else {
            let listing = relevant_memories
                .iter()
                .enumerate()
                .map(|(i, mem)| format!("{}. {}", i + 1, mem))
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("🧠 Here's what I remember:\n\n{}", listing)
        };
        return ReplyDecision::reply_only(reply);
    }

    if let Some(first) = relevant_memories.first() {
        return ReplyDecision::reply_only(format!(
            "💭 Based on what I remember about you: {}...\n\nRegarding \"{}\": This seems related to our previous conversations. Would you like me to remember this too?",
            truncate_chars(first, MEMORY_PREVIEW_CHARS),
            message
        ));
    }

    if lower.contains("hello") || lower.contains("hi") {
        return ReplyDecision::reply_only(GREETING.to_string());
    }

    if lower.contains("test") {
        return ReplyDecision::reply_only(TEST_ACK.to_string());
    }

    let mut reply = format!(
        "💬 I see you said: \"{}\". I can help you store this as a memory if you'd like! Just say \"remember this\" or ask me \"what do you know about me?\"",
        message
    );
    let mut memory_write = None;
    if message.split_whitespace().count() > AUTO_SAVE_MIN_TOKENS && !message.contains('?') {
        memory_write = Some(format!("User mentioned: {}", message));
        reply.push_str(AUTO_SAVED_SUFFIX);
    }
    ReplyDecision {
        reply,
        memory_write,
    }
}

/// First `max` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_stores_message_verbatim() {
        let d = decide_reply("Remember I like tea", &[]);
        assert_eq!(d.memory_write.as_deref(), Some("Remember I like tea"));
        assert_eq!(d.reply, CONFIRM_SAVED);
    }

    #[test]
    fn save_matches_case_insensitively() {
        let d = decide_reply("please SAVE this", &[]);
        assert!(d.memory_write.is_some());
    }

    #[test]
    fn remember_takes_priority_over_recall() {
        let d = decide_reply("remember this, then recall it", &[]);
        assert_eq!(d.reply, CONFIRM_SAVED);
        assert!(d.memory_write.is_some());
    }

    #[test]
    fn recall_lists_memories_numbered_without_writing() {
        let memories = vec!["I like tea".to_string(), "I live in Lisbon".to_string()];
        let d = decide_reply("what do you know about me?", &memories);
        assert!(d.memory_write.is_none());
        assert!(d.reply.contains("1. I like tea"));
        assert!(d.reply.contains("2. I live in Lisbon"));
    }

    #[test]
    fn recall_with_no_memories_uses_empty_template() {
        let d = decide_reply("recall everything", &[]);
        assert!(d.memory_write.is_none());
        assert_eq!(d.reply, NOTHING_STORED);
    }

    #[test]
    fn context_reply_quotes_first_memory_truncated() {
        let long = "x".repeat(150);
        let d = decide_reply("tell me more", &[long]);
        assert!(d.memory_write.is_none());
        assert!(d.reply.contains(&"x".repeat(100)));
        assert!(!d.reply.contains(&"x".repeat(101)));
        assert!(d.reply.contains("Regarding \"tell me more\""));
    }

    #[test]
    fn truncation_is_utf8_safe() {
        let mem = "é".repeat(120);
        let d = decide_reply("tell me more", &[mem]);
        assert!(d.reply.contains(&"é".repeat(100)));
    }

    #[test]
    fn context_reply_outranks_greeting() {
        let d = decide_reply("hello", &["I like tea".to_string()]);
        assert!(d.reply.starts_with("💭"));
    }

    #[test]
    fn greeting_and_test_templates() {
        assert_eq!(decide_reply("hello there", &[]).reply, GREETING);
        assert_eq!(decide_reply("hi", &[]).reply, GREETING);
        assert_eq!(decide_reply("just a test", &[]).reply, TEST_ACK);
    }

    #[test]
    fn long_statement_is_auto_saved() {
        let d = decide_reply("I went to the store today and bought bread", &[]);
        assert_eq!(
            d.memory_write.as_deref(),
            Some("User mentioned: I went to the store today and bought bread")
        );
        assert!(d.reply.ends_with(AUTO_SAVED_SUFFIX));
    }

    #[test]
    fn questions_are_never_auto_saved() {
        let d = decide_reply("Did you go to the store today?", &[]);
        assert!(d.memory_write.is_none());
        assert!(!d.reply.contains("automatically saved"));
    }

    #[test]
    fn short_statements_are_not_auto_saved() {
        // 5 tokens: at the threshold, not over it.
        let d = decide_reply("one two four five six", &[]);
        assert!(d.memory_write.is_none());
    }

    #[test]
    fn default_reply_echoes_the_message() {
        let d = decide_reply("ok", &[]);
        assert!(d.reply.contains("I see you said: \"ok\""));
    }
}
