//! Quick prompts and follow-up action hints shown around the chat.

/// Prompts the chat page offers for one-key prefill.
pub const SUGGESTIONS: &[&str] = &[
    "Sign me up for GitHub",
    "Create a new identity",
    "Show my accounts",
    "How does automation work?",
];

/// At most this many follow-up actions are offered per reply.
pub const MAX_SUGGESTED_ACTIONS: usize = 4;

/// Keyword group → two action labels, checked in order.
const ACTION_GROUPS: &[(&[&str], [&str; 2])] = &[
    (
        &["identity", "identities", "profile"],
        ["View your identities", "Create new identity"],
    ),
    (
        &["account", "accounts", "signup", "sign up"],
        ["View your accounts", "Start automated signup"],
    ),
    (&["api", "key", "token"], ["View API keys", "Generate new API key"]),
    (
        &["help", "how", "what"],
        ["View documentation", "See example commands"],
    ),
];

/// Follow-up actions for a user message, by substring match on the lower-cased text.
pub fn suggested_actions(message: &str) -> Vec<&'static str> {
    let msg = message.to_lowercase();
    ACTION_GROUPS
        .iter()
        .filter(|(words, _)| words.iter().any(|w| msg.contains(w)))
        .flat_map(|(_, labels)| labels.iter().copied())
        .take(MAX_SUGGESTED_ACTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_no_actions() {
        assert!(suggested_actions("hello").is_empty());
    }

    #[test]
    fn test_single_group() {
        assert_eq!(
            suggested_actions("My API token"),
            vec!["View API keys", "Generate new API key"]
        );
    }

    #[test]
    fn test_truncated_to_four_in_group_order() {
        let actions = suggested_actions("what identity for my accounts with an api key?");
        assert_eq!(
            actions,
            vec![
                "View your identities",
                "Create new identity",
                "View your accounts",
                "Start automated signup",
            ]
        );
    }

    #[test]
    fn test_suggestions_are_nonblank() {
        assert_eq!(SUGGESTIONS.len(), 4);
        assert!(SUGGESTIONS.iter().all(|s| !s.trim().is_empty()));
    }
}
