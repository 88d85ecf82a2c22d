// Backend
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/chatbot-api/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

// Storage keys, session scoped
pub const CHAT_HISTORY_KEY: &str = "chat_history";
pub const SESSION_ID_KEY: &str = "chat_session_id";

// Storage keys, long lived
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";
pub const PREFERRED_MODEL_KEY: &str = "preferredModel";

pub const DEFAULT_LANGUAGE: &str = "en";
pub const SWAHILI: &str = "sw";

// User-facing text
pub const PENDING_TEXT: &str = "Thinking...";
pub const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "Sorry, I'm having trouble connecting. Please try again.";
pub const EMPTY_REPLY_MESSAGE: &str = "Sorry, I didn't get a reply. Please try again.";
pub const ISSUE_PREFIX: &str = "Sorry, I encountered an issue: ";
pub const LANGUAGE_SWITCHED_SW: &str = "Lugha imebadilishwa kuwa Swahili";
pub const LANGUAGE_SWITCHED_EN: &str = "Language switched to English";

// Files under the data directory
pub const SESSION_STORE_FILE: &str = "session.json";
pub const PREFERENCE_STORE_FILE: &str = "preferences.json";
pub const LOG_BASENAME: &str = "chatbox";
