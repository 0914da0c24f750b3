use serde_json::Value;

/// Reply used when the model answered with JSON but gave no usable `reply`.
pub const DEFAULT_REPLY: &str = "Hi there!";

const FIND_MOVIE_INTENT: &str = "find_movie";

/// What the classifier decided the user wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Chat { reply: String },
    FindMovie { title: String },
}

/// Turns the raw completion text into an [`Intent`].
///
/// Total over all inputs: text that is not JSON is handed back to the user
/// verbatim as a chat reply.
pub fn interpret(raw: &str) -> Intent {
    serde_json::from_str::<Value>(raw)
        .map(|value| Intent::from_value(&value))
        .unwrap_or_else(|_| Intent::Chat {
            reply: raw.to_string(),
        })
}

impl Intent {
    fn from_value(value: &Value) -> Self {
        let intent = value.get("intent").and_then(Value::as_str);
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty());

        match (intent, title) {
            (Some(FIND_MOVIE_INTENT), Some(title)) => Intent::FindMovie {
                title: title.to_string(),
            },
            _ => Intent::Chat {
                reply: reply_text(value.get("reply")),
            },
        }
    }
}

fn reply_text(reply: Option<&Value>) -> String {
    match reply {
        None | Some(Value::Null) => DEFAULT_REPLY.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(reply: &str) -> Intent {
        Intent::Chat {
            reply: reply.to_string(),
        }
    }

    #[test]
    fn test_chat_intent_uses_reply() {
        let intent = interpret(r#"{"intent": "chat", "reply": "Hello! How can I help?"}"#);
        assert_eq!(intent, chat("Hello! How can I help?"));
    }

    #[test]
    fn test_find_movie_intent() {
        let intent = interpret(r#"{"intent": "find_movie", "title": "Inception"}"#);
        assert_eq!(
            intent,
            Intent::FindMovie {
                title: "Inception".to_string()
            }
        );
    }

    #[test]
    fn test_non_json_is_returned_verbatim() {
        let raw = "Sure! Inception is a great movie.\n{not json";
        assert_eq!(interpret(raw), chat(raw));
        assert_eq!(interpret(""), chat(""));
    }

    #[test]
    fn test_find_movie_without_title_falls_back_to_chat() {
        assert_eq!(
            interpret(r#"{"intent": "find_movie"}"#),
            chat(DEFAULT_REPLY)
        );
        assert_eq!(
            interpret(r#"{"intent": "find_movie", "title": ""}"#),
            chat(DEFAULT_REPLY)
        );
        assert_eq!(
            interpret(r#"{"intent": "find_movie", "title": null, "reply": "Which one?"}"#),
            chat("Which one?")
        );
        assert_eq!(
            interpret(r#"{"intent": "find_movie", "title": 42}"#),
            chat(DEFAULT_REPLY)
        );
    }

    #[test]
    fn test_whitespace_title_still_routes_to_find_movie() {
        assert_eq!(
            interpret(r#"{"intent": "find_movie", "title": "   "}"#),
            Intent::FindMovie {
                title: "   ".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_or_missing_intent_is_chat() {
        assert_eq!(
            interpret(r#"{"intent": "weather", "reply": "It's sunny."}"#),
            chat("It's sunny.")
        );
        assert_eq!(interpret(r#"{"title": "Inception"}"#), chat(DEFAULT_REPLY));
        assert_eq!(interpret("{}"), chat(DEFAULT_REPLY));
    }

    #[test]
    fn test_null_and_non_string_replies() {
        assert_eq!(
            interpret(r#"{"intent": "chat", "reply": null}"#),
            chat(DEFAULT_REPLY)
        );
        assert_eq!(interpret(r#"{"intent": "chat", "reply": 7}"#), chat("7"));
    }

    #[test]
    fn test_json_that_is_not_an_object() {
        assert_eq!(interpret("[1, 2, 3]"), chat(DEFAULT_REPLY));
        assert_eq!(interpret("42"), chat(DEFAULT_REPLY));
        assert_eq!(interpret(r#""just a string""#), chat(DEFAULT_REPLY));
        assert_eq!(interpret("null"), chat(DEFAULT_REPLY));
    }
}
