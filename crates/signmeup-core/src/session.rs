//! The conversation session — transcript, busy gate, and the delayed reply task.
//!
//! A `Session` owns its `SessionState` behind a mutex that only `submit` and the
//! reply task it spawns ever write to. The reply waits out a randomized delay
//! on the tokio timer, racing the session's cancellation token, so closing or
//! dropping the session mid-delay discards the reply instead of applying it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classifier::classify_topic;
use crate::config::{Config, ReplyDelay};
use crate::events::{ReplyMeta, SessionEvent, StatusData};
use crate::intent::parse_signup_request;
use crate::suggest::suggested_actions;
use crate::types::{MessageEntry, Sender, SessionState, Transcript};

/// Result of a `submit` call. Only `Accepted` changed anything.
#[derive(Debug)]
pub enum Submission {
    Accepted(PendingReply),
    /// Empty after trimming whitespace
    Blank,
    /// A reply is still pending
    Busy,
    /// The session was closed
    Closed,
}

/// Handle to an in-flight reply.
#[derive(Debug)]
pub struct PendingReply {
    user_entry: MessageEntry,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl PendingReply {
    /// The user entry this reply answers.
    pub fn user_entry(&self) -> &MessageEntry {
        &self.user_entry
    }

    /// The sampled latency before the reply lands.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the reply has been applied or discarded.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

pub struct Session {
    id: Uuid,
    state: Arc<Mutex<SessionState>>,
    delay: ReplyDelay,
    event_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    /// Start a session seeded with the configured greeting.
    pub fn new(config: &Config) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        let id = Uuid::new_v4();
        info!(session = %id, "session started");

        Self {
            id,
            state: Arc::new(Mutex::new(SessionState::seeded(&config.greeting))),
            delay: config.reply_delay(),
            event_tx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        lock(&self.state).transcript().clone()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).is_busy()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Append the user's utterance and schedule the assistant reply.
    ///
    /// Blank input, input while a reply is pending, and input after close are
    /// ignored and leave the state untouched. Must be called from within a
    /// tokio runtime.
    pub fn submit(&self, utterance: &str) -> Submission {
        if utterance.trim().is_empty() {
            debug!(session = %self.id, "ignoring blank utterance");
            return Submission::Blank;
        }

        let user_entry = {
            let mut state = lock(&self.state);
            if self.cancel.is_cancelled() {
                return Submission::Closed;
            }
            if state.busy {
                debug!(session = %self.id, "ignoring utterance while busy");
                return Submission::Busy;
            }
            let entry = state.append(Sender::User, utterance);
            state.busy = true;
            entry
        };

        let delay = self.delay.sample(&mut rand::thread_rng());
        debug!(
            session = %self.id,
            message = %user_entry.id(),
            delay_ms = delay.as_millis() as u64,
            "utterance accepted"
        );

        self.broadcast(SessionEvent::Message(user_entry.clone()));
        self.broadcast(SessionEvent::Status(StatusData { busy: true }));

        let handle = tokio::spawn(deliver_reply(
            self.id,
            self.state.clone(),
            self.event_tx.clone(),
            self.cancel.clone(),
            utterance.to_string(),
            delay,
        ));

        Submission::Accepted(PendingReply {
            user_entry,
            delay,
            handle,
        })
    }

    /// Tear the session down. A reply still waiting out its delay is dropped.
    pub fn close(&self) {
        // Held so a reply task cannot apply between the check and the cancel.
        let _state = lock(&self.state);
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        info!(session = %self.id, "session closed");
        self.broadcast(SessionEvent::Closed);
    }

    fn broadcast(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("delay", &self.delay)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

async fn deliver_reply(
    session_id: Uuid,
    state: Arc<Mutex<SessionState>>,
    event_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
    utterance: String,
    delay: Duration,
) {
    tokio::select! {
        biased;

        () = cancel.cancelled() => {
            debug!(session = %session_id, "reply discarded, session closed during delay");
            return;
        }

        () = tokio::time::sleep(delay) => {}
    }

    apply_reply(session_id, &state, &event_tx, &cancel, &utterance);
}

/// Append the reply for `utterance` unless the session was closed, checking
/// the token under the state lock. Returns whether the reply landed.
fn apply_reply(
    session_id: Uuid,
    state: &Mutex<SessionState>,
    event_tx: &broadcast::Sender<SessionEvent>,
    cancel: &CancellationToken,
    utterance: &str,
) -> bool {
    let topic = classify_topic(utterance);
    let meta = ReplyMeta {
        topic,
        suggestions: suggested_actions(utterance)
            .into_iter()
            .map(String::from)
            .collect(),
        signup: parse_signup_request(utterance),
    };

    let entry = {
        let mut state = lock(state);
        if cancel.is_cancelled() {
            debug!(session = %session_id, "reply discarded, session closed");
            return false;
        }
        let entry = state.append(Sender::Assistant, topic.reply());
        state.busy = false;
        entry
    };

    debug!(session = %session_id, message = %entry.id(), %topic, "reply applied");
    let _ = event_tx.send(SessionEvent::Reply { entry, meta });
    let _ = event_tx.send(SessionEvent::Status(StatusData { busy: false }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{GITHUB_SIGNUP_REPLY, HELP_REPLY, IDENTITIES_REPLY};
    use crate::classifier::Topic;
    use crate::config::DEFAULT_GREETING;

    fn accepted(submission: Submission) -> PendingReply {
        match submission {
            Submission::Accepted(pending) => pending,
            other => panic!("expected accepted submission, got {:?}", other),
        }
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        events
    }

    #[tokio::test]
    async fn test_fresh_session_has_greeting_only() {
        let session = Session::new(&Config::default());
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        let greeting = &transcript.as_slice()[0];
        assert_eq!(greeting.sender(), Sender::Assistant);
        assert_eq!(greeting.text(), DEFAULT_GREETING);
        assert!(!session.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_user_then_assistant() {
        let session = Session::new(&Config::default());
        let pending = accepted(session.submit("Sign me up for github"));

        // User entry lands immediately, reply does not.
        assert!(session.is_busy());
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(pending.user_entry().sender(), Sender::User);

        pending.wait().await;

        assert!(!session.is_busy());
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        let entries = transcript.as_slice();
        assert_eq!(entries[1].sender(), Sender::User);
        assert_eq!(entries[1].text(), "Sign me up for github");
        assert_eq!(entries[2].sender(), Sender::Assistant);
        assert_eq!(entries[2].text(), GITHUB_SIGNUP_REPLY);
        assert!(entries[1].id() < entries[2].id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_delay_within_bounds() {
        let session = Session::new(&Config::default());
        let start = tokio::time::Instant::now();
        let pending = accepted(session.submit("hello"));
        let sampled = pending.delay();
        assert!(sampled >= Duration::from_millis(1000));
        assert!(sampled < Duration::from_millis(2000));

        pending.wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed <= Duration::from_millis(2000));
        assert_eq!(session.transcript().last().map(|e| e.text()), Some(HELP_REPLY));
    }

    #[tokio::test]
    async fn test_blank_submissions_ignored() {
        let session = Session::new(&Config::default());
        assert!(matches!(session.submit(""), Submission::Blank));
        assert!(matches!(session.submit("   "), Submission::Blank));
        assert!(matches!(session.submit("\n\t"), Submission::Blank));
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_busy_ignored() {
        let session = Session::new(&Config::default());
        let pending = accepted(session.submit("tell me about identities"));
        let before = session.transcript();

        assert!(matches!(session.submit("hello"), Submission::Busy));
        assert_eq!(session.transcript(), before);
        assert!(session.is_busy());

        pending.wait().await;
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().map(|e| e.text()), Some(IDENTITIES_REPLY));
    }

    #[tokio::test(start_paused = true)]
    async fn test_turns_alternate_over_many_submits() {
        let session = Session::new(&Config::default());
        for utterance in ["hello", "accounts?", "how does it work", "sign me up"] {
            accepted(session.submit(utterance)).wait().await;
        }
        let senders: Vec<Sender> = session.transcript().iter().map(|e| e.sender()).collect();
        assert_eq!(senders.len(), 9);
        for (i, sender) in senders.iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 { Sender::User } else { Sender::Assistant };
            assert_eq!(*sender, expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_during_delay_discards_reply() {
        let session = Session::new(&Config::default());
        let mut rx = session.subscribe();
        let pending = accepted(session.submit("hello"));

        tokio::time::sleep(Duration::from_millis(500)).await;
        session.close();
        pending.wait().await;

        assert_eq!(session.transcript().len(), 2);
        assert!(matches!(session.submit("again"), Submission::Closed));
        let events = drain(&mut rx);
        assert!(events.contains(&SessionEvent::Closed));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::Reply { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_during_delay_discards_reply() {
        let session = Session::new(&Config::default());
        let mut rx = session.subscribe();
        let pending = accepted(session.submit("hello"));

        drop(session);
        pending.wait().await;

        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&SessionEvent::Closed));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::Reply { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_after_delay_elapses_discards_reply() {
        let config = Config {
            reply_delay_min_ms: 100,
            reply_delay_max_ms: 100,
            ..Config::default()
        };
        let session = Session::new(&config);
        let mut rx = session.subscribe();
        let pending = accepted(session.submit("hello"));

        // The timer is due, but the reply task has not run since.
        tokio::time::advance(Duration::from_millis(100)).await;
        session.close();
        pending.wait().await;
        assert_eq!(session.transcript().len(), 2);

        // A reply task already past its sleep still sees the closed token
        // once it holds the lock.
        assert!(!apply_reply(
            session.id,
            &session.state,
            &session.event_tx,
            &session.cancel,
            "hello",
        ));
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript().last().map(|e| e.sender()), Some(Sender::User));

        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&SessionEvent::Closed));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::Reply { .. })));
    }

    #[tokio::test]
    async fn test_apply_reply_on_open_session_lands() {
        let session = Session::new(&Config::default());
        let mut rx = session.subscribe();
        assert!(apply_reply(
            session.id,
            &session.state,
            &session.event_tx,
            &session.cancel,
            "tell me about identities",
        ));
        assert_eq!(session.transcript().last().map(|e| e.text()), Some(IDENTITIES_REPLY));
        let events = drain(&mut rx);
        assert!(matches!(&events[0], SessionEvent::Reply { meta, .. } if meta.topic == Topic::Identities));
        assert_eq!(events[1], SessionEvent::Status(StatusData { busy: false }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_sequence() {
        let session = Session::new(&Config::default());
        let mut rx = session.subscribe();
        accepted(session.submit("Sign me up for GitHub")).wait().await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], SessionEvent::Message(e) if e.sender() == Sender::User));
        assert_eq!(events[1], SessionEvent::Status(StatusData { busy: true }));
        match &events[2] {
            SessionEvent::Reply { entry, meta } => {
                assert_eq!(entry.sender(), Sender::Assistant);
                assert_eq!(meta.topic, Topic::GithubSignup);
                assert_eq!(
                    meta.signup.as_ref().map(|s| s.website_url.as_str()),
                    Some("https://github.com")
                );
            }
            other => panic!("expected reply, got {:?}", other),
        }
        assert_eq!(events[3], SessionEvent::Status(StatusData { busy: false }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_config() {
        let config = Config {
            reply_delay_min_ms: 10,
            reply_delay_max_ms: 10,
            ..Config::default()
        };
        let session = Session::new(&config);
        let pending = accepted(session.submit("hi"));
        assert_eq!(pending.delay(), Duration::from_millis(10));
        pending.wait().await;
        assert!(!session.is_busy());
    }
}
