// src/lib.rs

pub mod api;
pub mod chatbot;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod csrf;
pub mod errors;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod preferences;
pub mod session;
pub mod status_indicator;
pub mod storage;
pub mod ui;

pub use chatbot::{Chatbot, ChatbotOptions, Collaborators, TurnOutcome};
pub use errors::{ChatError, ChatResult};
