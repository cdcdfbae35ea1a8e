//! Canned-reply classifier for the demo chat assistant.
//!
//! An ordered list of (predicate, topic) rules evaluated top to bottom over the
//! lower-cased utterance. First match wins; no match falls back to the help prompt.

use serde::{Deserialize, Serialize};

/// Which canned reply an utterance maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    GithubSignup,
    Signup,
    Identities,
    Accounts,
    HowItWorks,
    Help,
}

impl Topic {
    /// The fixed reply text for this topic.
    pub fn reply(self) -> &'static str {
        match self {
            Topic::GithubSignup => GITHUB_SIGNUP_REPLY,
            Topic::Signup => SIGNUP_REPLY,
            Topic::Identities => IDENTITIES_REPLY,
            Topic::Accounts => ACCOUNTS_REPLY,
            Topic::HowItWorks => HOW_IT_WORKS_REPLY,
            Topic::Help => HELP_REPLY,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topic::GithubSignup => write!(f, "github_signup"),
            Topic::Signup => write!(f, "signup"),
            Topic::Identities => write!(f, "identities"),
            Topic::Accounts => write!(f, "accounts"),
            Topic::HowItWorks => write!(f, "how_it_works"),
            Topic::Help => write!(f, "help"),
        }
    }
}

// ── Reply texts ──

pub const GITHUB_SIGNUP_REPLY: &str = "I'd help you sign up for GitHub! In the full version, I would:\n1. Analyze GitHub's signup page\n2. Fill out the form with your identity information\n3. Handle email verification\n4. Store the account credentials securely\n\nFor now, this is a demo showing the concept.";

pub const SIGNUP_REPLY: &str = "I'd be happy to help you sign up for that service! In the full version, I would analyze the website, create automation scripts, and handle the signup process for you. Which website would you like to sign up for?";

pub const IDENTITIES_REPLY: &str = "You can create multiple identities for different purposes:\n\n• **Professional Identity**: For business accounts (LinkedIn, GitHub, etc.)\n• **Personal Identity**: For social media and personal accounts\n• **Shopping Identity**: For e-commerce and retail accounts\n\nEach identity has its own personal information, preferences, and encryption.";

pub const ACCOUNTS_REPLY: &str = "Your accounts are managed securely with:\n\n• **Encrypted storage** of all credentials\n• **Automated signup scripts** for quick registration\n• **API key management** for integrated services\n• **Success rate tracking** for each website\n\nCheck the Accounts page to see your current accounts.";

pub const HOW_IT_WORKS_REPLY: &str = "SignMeUp works through AI-powered automation:\n\n1. **Web Analysis**: I analyze website signup forms\n2. **Script Generation**: Create reusable automation scripts\n3. **Identity Selection**: Choose which identity to use\n4. **Automated Signup**: Fill forms and handle verification\n5. **Secure Storage**: Encrypt and store all account data\n\nEverything is encrypted with your master key!";

pub const HELP_REPLY: &str = "I'm here to help with identity management and account automation! You can ask me about:\n\n• Signing up for specific websites\n• Managing your identities\n• Viewing your accounts\n• How the automation works\n\nWhat would you like to know more about?";

// ── Rules ──

type Predicate = fn(&str) -> bool;

fn wants_github_signup(m: &str) -> bool {
    m.contains("sign me up") && m.contains("github")
}

fn wants_signup(m: &str) -> bool {
    m.contains("sign me up")
}

fn mentions_identities(m: &str) -> bool {
    m.contains("identity") || m.contains("identities")
}

fn mentions_accounts(m: &str) -> bool {
    m.contains("account") || m.contains("accounts")
}

fn asks_how_it_works(m: &str) -> bool {
    m.contains("how") || m.contains("work")
}

/// Ordered rule table. Predicates receive the already lower-cased input.
const RULES: &[(Predicate, Topic)] = &[
    (wants_github_signup, Topic::GithubSignup),
    (wants_signup, Topic::Signup),
    (mentions_identities, Topic::Identities),
    (mentions_accounts, Topic::Accounts),
    (asks_how_it_works, Topic::HowItWorks),
];

/// Map an utterance to its topic. Total: anything unmatched is `Topic::Help`.
pub fn classify_topic(utterance: &str) -> Topic {
    let msg = utterance.to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(msg.as_str()))
        .map(|(_, topic)| *topic)
        .unwrap_or(Topic::Help)
}

/// Pick the canned reply for an utterance.
pub fn classify(utterance: &str) -> &'static str {
    classify_topic(utterance).reply()
}
