// src/chatbot.rs

use crate::api::{ApiResponse, ChatTransport};
use crate::constants::*;
use crate::conversation::Conversation;
use crate::models::{ChatRequest, Message, Preferences, Sender};
use crate::normalize::{describe_failure, reply_from_body};
use crate::preferences::{PreferenceKey, PreferenceStore};
use crate::session::SessionIdentity;
use crate::status_indicator::StatusIndicator;
use crate::storage::KeyValueStore;
use crate::ui::Renderer;
use log::{debug, error, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything the chatbot talks to, supplied by the host.
pub struct Collaborators {
    pub renderer: Arc<dyn Renderer>,
    /// Cleared when the session ends: transcript and session id.
    pub session_store: Arc<dyn KeyValueStore>,
    /// Survives sessions: language and model.
    pub preference_store: Arc<dyn KeyValueStore>,
    pub transport: Arc<dyn ChatTransport>,
}

#[derive(Debug, Clone)]
pub struct ChatbotOptions {
    pub default_language: String,
    pub single_flight: bool,
}

impl Default for ChatbotOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            single_flight: false,
        }
    }
}

/// How a call to [`Chatbot::submit`] ended. Every variant except `Ignored`
/// and `Busy` carries the bot text that was appended to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// A reply is still outstanding and single-flight mode is on.
    Busy,
    Replied(String),
    TransportFailed(String),
    ProtocolFailed(String),
}

impl TurnOutcome {
    pub fn bot_text(&self) -> Option<&str> {
        match self {
            TurnOutcome::Replied(text)
            | TurnOutcome::TransportFailed(text)
            | TurnOutcome::ProtocolFailed(text) => Some(text),
            TurnOutcome::Ignored | TurnOutcome::Busy => None,
        }
    }
}

/// Runs turns: takes user input, relays it to the chat backend and records
/// both sides in the transcript.
pub struct Chatbot {
    conversation: Conversation,
    session: SessionIdentity,
    preferences: PreferenceStore,
    transport: Arc<dyn ChatTransport>,
    renderer: Arc<dyn Renderer>,
    indicator: Mutex<StatusIndicator>,
    in_flight: AtomicUsize,
    single_flight: bool,
}

impl Chatbot {
    pub fn new(collaborators: Collaborators, options: ChatbotOptions) -> Self {
        let Collaborators {
            renderer,
            session_store,
            preference_store,
            transport,
        } = collaborators;

        Chatbot {
            conversation: Conversation::new(session_store.clone(), renderer.clone()),
            session: SessionIdentity::new(session_store),
            preferences: PreferenceStore::with_default_language(
                preference_store,
                &options.default_language,
            ),
            transport,
            renderer,
            indicator: Mutex::new(StatusIndicator::new()),
            in_flight: AtomicUsize::new(0),
            single_flight: options.single_flight,
        }
    }

    /// Replays the persisted transcript. Call once after construction.
    pub fn restore_history(&self) -> usize {
        self.conversation.restore()
    }

    pub async fn submit(&self, raw_input: &str) -> TurnOutcome {
        let message = raw_input.trim();
        if message.is_empty() {
            return TurnOutcome::Ignored;
        }

        let Some(_turn) = self.begin_turn() else {
            debug!("Rejected submission while a reply is outstanding");
            return TurnOutcome::Busy;
        };

        self.conversation.append(Sender::User, message);
        self.renderer.clear_input();
        self.indicator().show(&*self.renderer);

        let request = self.build_request(message);
        let result = self.transport.send(&request).await;

        self.indicator().clear(&*self.renderer);

        let outcome = match result {
            Ok(response) if response.is_success() => {
                TurnOutcome::Replied(reply_from_body(&response.body))
            }
            Ok(response) => {
                error!(
                    "API error: {} {}: {}",
                    response.status, response.reason, response.body
                );
                TurnOutcome::ProtocolFailed(failure_text(&response))
            }
            Err(e) => {
                error!("Chat API Error: {}", e);
                TurnOutcome::TransportFailed(CONNECTIVITY_FAILURE_MESSAGE.to_string())
            }
        };

        if let Some(text) = outcome.bot_text() {
            self.conversation.append(Sender::Bot, text);
        }
        outcome
    }

    pub fn set_language(&self, language: &str) {
        self.preferences.set(PreferenceKey::Language, language);
        let confirmation = if self.preferences.language() == SWAHILI {
            LANGUAGE_SWITCHED_SW
        } else {
            LANGUAGE_SWITCHED_EN
        };
        self.conversation.append(Sender::Bot, confirmation);
    }

    /// `None` or an empty name restores the backend default.
    pub fn set_model(&self, model: Option<&str>) {
        self.preferences
            .set(PreferenceKey::Model, model.unwrap_or_default());
        let shown = self
            .preferences
            .model()
            .unwrap_or_else(|| "default".to_string());
        self.conversation
            .append(Sender::Bot, format!("Model set to {}", shown));
    }

    /// Ends the session: the transcript is wiped and the next turn carries
    /// a fresh session id. Preferences are kept.
    pub fn end_session(&self) {
        self.indicator().clear(&*self.renderer);
        self.conversation.clear();
        self.session.reset();
        info!("Session ended");
    }

    pub fn messages(&self) -> Vec<Message> {
        self.conversation.messages()
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences.preferences()
    }

    pub fn session_id(&self) -> String {
        self.session.get_or_create()
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn build_request(&self, message: &str) -> ChatRequest {
        let Preferences { language, model } = self.preferences.preferences();
        ChatRequest {
            message: message.to_string(),
            language,
            session_id: self.session.get_or_create(),
            model,
        }
    }

    fn begin_turn(&self) -> Option<TurnGuard<'_>> {
        if self.single_flight {
            self.in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }
        Some(TurnGuard(&self.in_flight))
    }

    fn indicator(&self) -> MutexGuard<'_, StatusIndicator> {
        self.indicator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a turn as outstanding until dropped, including when the submit
/// future is abandoned mid-request.
struct TurnGuard<'a>(&'a AtomicUsize);

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn failure_text(response: &ApiResponse) -> String {
    format!(
        "{}{}",
        ISSUE_PREFIX,
        describe_failure(response.status, &response.reason, &response.body)
    )
}
