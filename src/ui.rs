// src/ui.rs

use crate::constants::PENDING_TEXT;
use crate::models::{Message, Sender};
use colored::Colorize;
use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Render target for the transcript. Implementations own whatever surface
/// they draw on; the controller only tells them what changed.
pub trait Renderer: Send + Sync {
    fn draw_message(&self, message: &Message);
    fn show_pending(&self);
    fn remove_pending(&self);

    /// Called after a submission is accepted. Hosts with their own line
    /// editor have nothing to clear.
    fn clear_input(&self) {}
}

/// Prints the transcript to stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }

    fn clear_line(&self) {
        let mut stdout = io::stdout();
        if execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine)).is_err() {
            print!("\r");
        }
        let _ = stdout.flush();
    }
}

impl Renderer for TerminalRenderer {
    fn draw_message(&self, message: &Message) {
        match message.sender {
            Sender::User => println!("{} {}", "💬 You:".green().bold(), message.text),
            Sender::Bot => println!("{} {}", "🤖 Bot:".blue().bold(), message.text),
        }
    }

    fn show_pending(&self) {
        print!("{}", PENDING_TEXT.dimmed().italic());
        let _ = io::stdout().flush();
    }

    fn remove_pending(&self) {
        self.clear_line();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Drawn(Message),
        PendingShown,
        PendingRemoved,
        InputCleared,
    }

    /// Records every call so tests can assert on ordering.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingRenderer {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        pub fn drawn(&self) -> Vec<Message> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Drawn(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        /// Whether an indicator is on screen after replaying all events.
        pub fn pending_visible(&self) -> bool {
            self.events().iter().fold(false, |live, e| match e {
                Event::PendingShown => true,
                Event::PendingRemoved => false,
                _ => live,
            })
        }
    }

    impl Renderer for RecordingRenderer {
        fn draw_message(&self, message: &Message) {
            self.events.lock().unwrap().push(Event::Drawn(message.clone()));
        }

        fn show_pending(&self) {
            self.events.lock().unwrap().push(Event::PendingShown);
        }

        fn remove_pending(&self) {
            self.events.lock().unwrap().push(Event::PendingRemoved);
        }

        fn clear_input(&self) {
            self.events.lock().unwrap().push(Event::InputCleared);
        }
    }
}
