//! App state, input handling, session event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, warn};

use signmeup_core::config::Config;
use signmeup_core::events::{ReplyMeta, SessionEvent};
use signmeup_core::fixtures::{filter_accounts, Account, AccountFilter, ACCOUNTS, IDENTITIES};
use signmeup_core::session::{Session, Submission};
use signmeup_core::suggest::SUGGESTIONS;
use signmeup_core::types::{MessageEntry, Sender};

/// Top-level pages, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Identities,
    Accounts,
    Chat,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Identities, Page::Accounts, Page::Chat];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Identities => "Identities",
            Page::Accounts => "Accounts",
            Page::Chat => "Chat",
        }
    }

    fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

/// A line in the chat feed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl From<&MessageEntry> for ChatMessage {
    fn from(entry: &MessageEntry) -> Self {
        Self {
            sender: entry.sender(),
            text: entry.text().to_string(),
        }
    }
}

/// The main application state.
pub struct App {
    pub session: Session,
    pub page: Page,
    pub messages: Vec<ChatMessage>,
    pub busy: bool,
    pub last_reply: Option<ReplyMeta>,
    pub input: String,
    pub scroll_offset: usize,
    pub selected_identity: usize,
    pub selected_account: usize,
    pub account_filter: AccountFilter,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let session = Session::new(config);
        let messages = session.transcript().iter().map(ChatMessage::from).collect();

        App {
            session,
            page: Page::Dashboard,
            messages,
            busy: false,
            last_reply: None,
            input: String::new(),
            scroll_offset: 0,
            selected_identity: 0,
            selected_account: 0,
            account_filter: AccountFilter::All,
            should_quit: false,
        }
    }

    /// Apply everything queued on the session channel without blocking.
    pub fn drain_events(&mut self, rx: &mut Receiver<SessionEvent>) {
        loop {
            match rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "session events lagged, resyncing from transcript");
                    self.resync();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Handle a session event.
    pub fn handle_event(&mut self, event: SessionEvent) {
        debug!(event = %event.to_json(), "session event");
        match event {
            SessionEvent::Message(entry) => {
                self.messages.push(ChatMessage::from(&entry));
                self.scroll_offset = 0;
            }
            SessionEvent::Reply { entry, meta } => {
                self.messages.push(ChatMessage::from(&entry));
                self.last_reply = Some(meta);
                self.scroll_offset = 0;
            }
            SessionEvent::Status(status) => {
                self.busy = status.busy;
            }
            SessionEvent::Closed => {
                self.busy = false;
            }
        }
    }

    fn resync(&mut self) {
        self.messages = self
            .session
            .transcript()
            .iter()
            .map(ChatMessage::from)
            .collect();
        self.busy = self.session.is_busy();
        self.last_reply = None;
    }

    /// Input is disabled while a reply is pending.
    pub fn input_enabled(&self) -> bool {
        self.page == Page::Chat && !self.busy
    }

    pub fn can_send(&self) -> bool {
        self.input_enabled() && !self.input.trim().is_empty()
    }

    /// Submit the input line to the session. The line is only cleared when
    /// the session accepts it.
    pub fn send_message(&mut self) -> bool {
        if !self.can_send() {
            return false;
        }
        match self.session.submit(&self.input) {
            Submission::Accepted(_) => {
                self.input.clear();
                self.busy = true;
                true
            }
            Submission::Blank | Submission::Busy | Submission::Closed => false,
        }
    }

    /// Prefill the input with one of the quick prompts.
    pub fn use_suggestion(&mut self, idx: usize) {
        if let Some(s) = SUGGESTIONS.get(idx) {
            self.input = (*s).to_string();
        }
    }

    pub fn visible_accounts(&self) -> Vec<&'static Account> {
        filter_accounts(ACCOUNTS, self.account_filter)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            // Page switching
            (KeyCode::Right, KeyModifiers::ALT) | (KeyCode::Tab, _) => self.next_page(),
            (KeyCode::Left, KeyModifiers::ALT) | (KeyCode::BackTab, _) => self.prev_page(),
            _ => match self.page {
                Page::Dashboard => self.handle_dashboard_key(key),
                Page::Identities => self.handle_identities_key(key),
                Page::Accounts => self.handle_accounts_key(key),
                Page::Chat => self.handle_chat_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => self.page = Page::Chat,
            KeyCode::Char('i') => self.page = Page::Identities,
            _ => {}
        }
    }

    fn handle_identities_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.selected_identity = self.selected_identity.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_identity + 1 < IDENTITIES.len() {
                    self.selected_identity += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_accounts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.selected_account = self.selected_account.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_account + 1 < self.visible_accounts().len() {
                    self.selected_account += 1;
                }
            }
            KeyCode::Char('f') => {
                self.account_filter = self.account_filter.cycle();
                self.selected_account = 0;
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.send_message();
            }
            KeyCode::F(n @ 1..=4) if self.input_enabled() => {
                self.use_suggestion(usize::from(n - 1));
            }
            KeyCode::Char(c) if self.input_enabled() => self.input.push(c),
            KeyCode::Backspace if self.input_enabled() => {
                self.input.pop();
            }
            KeyCode::PageUp | KeyCode::Up => self.scroll_up(),
            KeyCode::PageDown | KeyCode::Down => self.scroll_down(),
            _ => {}
        }
    }

    pub fn next_page(&mut self) {
        let idx = (self.page.index() + 1) % Page::ALL.len();
        self.page = Page::ALL[idx];
    }

    pub fn prev_page(&mut self) {
        let idx = (self.page.index() + Page::ALL.len() - 1) % Page::ALL.len();
        self.page = Page::ALL[idx];
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signmeup_core::classifier::Topic;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_starts_on_dashboard_with_greeting() {
        let app = App::new(&Config::default());
        assert_eq!(app.page, Page::Dashboard);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn test_page_cycling_wraps() {
        let mut app = App::new(&Config::default());
        app.prev_page();
        assert_eq!(app.page, Page::Chat);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.page, Page::Dashboard);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::ALT));
        assert_eq!(app.page, Page::Identities);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_round_trip_through_events() {
        let mut app = App::new(&Config::default());
        let mut rx = app.session.subscribe();
        app.page = Page::Chat;

        type_text(&mut app, "Show my accounts");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.input.is_empty());
        assert!(app.busy);
        assert!(!app.input_enabled());

        // Typing is ignored while the reply is pending.
        type_text(&mut app, "x");
        assert!(app.input.is_empty());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        app.drain_events(&mut rx);

        assert!(!app.busy);
        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.messages[1].text, "Show my accounts");
        assert_eq!(app.messages[2].sender, Sender::Assistant);
        let meta = app.last_reply.as_ref().unwrap();
        assert!(meta.suggestions.contains(&"View your accounts".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lagged_receiver_resyncs_and_drops_stale_hints() {
        let config = Config {
            event_capacity: 1,
            reply_delay_min_ms: 10,
            reply_delay_max_ms: 10,
            ..Config::default()
        };
        let mut app = App::new(&config);
        let mut rx = app.session.subscribe();
        app.page = Page::Chat;
        app.last_reply = Some(ReplyMeta {
            topic: Topic::Help,
            suggestions: vec!["Stale hint".to_string()],
            signup: None,
        });

        type_text(&mut app, "hello");
        app.handle_key(key(KeyCode::Enter));
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Four events went out on a one-slot channel.
        app.drain_events(&mut rx);

        assert!(app.last_reply.is_none());
        assert!(!app.busy);
        let expected: Vec<ChatMessage> = app
            .session
            .transcript()
            .iter()
            .map(ChatMessage::from)
            .collect();
        assert_eq!(app.messages, expected);
        assert_eq!(app.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_input_not_sent() {
        let mut app = App::new(&Config::default());
        app.page = Page::Chat;
        type_text(&mut app, "   ");
        assert!(!app.send_message());
        assert_eq!(app.input, "   ");
        assert_eq!(app.session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_suggestion_prefill() {
        let mut app = App::new(&Config::default());
        app.page = Page::Chat;
        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.input, "Sign me up for GitHub");
        app.handle_key(key(KeyCode::F(4)));
        assert_eq!(app.input, "How does automation work?");
    }

    #[tokio::test]
    async fn test_account_filter_resets_selection() {
        let mut app = App::new(&Config::default());
        app.page = Page::Accounts;
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_account, 2);

        // all -> active -> completed -> pending
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Char('f')));
        }
        assert_eq!(app.account_filter, AccountFilter::Pending);
        assert_eq!(app.selected_account, 0);
        assert_eq!(app.visible_accounts().len(), 1);

        // Only one row, selection stays put.
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_account, 0);
    }

    #[tokio::test]
    async fn test_identity_selection_clamped() {
        let mut app = App::new(&Config::default());
        app.page = Page::Identities;
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.selected_identity, IDENTITIES.len() - 1);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_identity, IDENTITIES.len() - 2);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = App::new(&Config::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
