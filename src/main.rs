use anyhow::{Context, Result};
use chatbox::{
    api::HttpTransport,
    config::Config,
    constants::{PREFERENCE_STORE_FILE, SESSION_STORE_FILE},
    csrf::CsrfSource,
    logging::init_logging,
    storage::FileStore,
    ui::{Renderer, TerminalRenderer},
    Chatbot, ChatbotOptions, Collaborators, TurnOutcome,
};
use colored::Colorize;
use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Send(String),
    Language(Option<String>),
    Model(Option<String>),
    NewSession,
    History,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Send(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };
    match name {
        "lang" | "language" => Command::Language(arg),
        "model" => Command::Model(arg),
        "new" => Command::NewSession,
        "history" => Command::History,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /lang <code>    switch reply language (e.g. en, sw)");
    println!("  /model [name]   pick a model, or reset to the backend default");
    println!("  /new            end this session and start a fresh transcript");
    println!("  /history        redraw the transcript");
    println!("  /quit           leave");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let data_dir = config.resolve_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let _logger = init_logging(&data_dir, &config.log_level)?;

    let transport = HttpTransport::new(
        config.api_url.clone(),
        CsrfSource::new(config.csrf_token.clone(), config.csrf_cookie.clone()),
        config.request_timeout(),
    )?;
    info!("Starting chatbox against {}", transport.endpoint());
    let session_store = FileStore::new(data_dir.join(SESSION_STORE_FILE));
    let preference_store = FileStore::new(data_dir.join(PREFERENCE_STORE_FILE));
    info!(
        "Session store at {}, preferences at {}",
        session_store.path().display(),
        preference_store.path().display()
    );
    let renderer = Arc::new(TerminalRenderer::new());

    let chatbot = Chatbot::new(
        Collaborators {
            renderer: renderer.clone(),
            session_store: Arc::new(session_store),
            preference_store: Arc::new(preference_store),
            transport: Arc::new(transport),
        },
        ChatbotOptions {
            default_language: config.default_language.clone(),
            single_flight: config.single_flight,
        },
    );

    println!(
        "{} {}",
        "chatbox".bold().cyan(),
        format!("({}, type /help for commands)", config.api_url).dimmed()
    );
    chatbot.restore_history();

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            Command::Send(message) => {
                if let TurnOutcome::Busy = chatbot.submit(&message).await {
                    println!("{}", "Still waiting for the last reply.".yellow());
                }
            }
            Command::Language(Some(code)) => chatbot.set_language(&code),
            Command::Language(None) => {
                println!("Current language: {}", chatbot.preferences().language)
            }
            Command::Model(name) => chatbot.set_model(name.as_deref()),
            Command::NewSession => {
                chatbot.end_session();
                println!("{}", "Started a new session.".dimmed());
            }
            Command::History => {
                for message in chatbot.messages() {
                    renderer.draw_message(&message);
                }
            }
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(name) => {
                println!("{} /{}", "Unknown command:".red(), name);
            }
        }
    }

    info!("Exiting chatbox");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_sent() {
        assert_eq!(
            parse_command("  hello there "),
            Command::Send("hello there".to_string())
        );
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            parse_command("/lang sw"),
            Command::Language(Some("sw".to_string()))
        );
        assert_eq!(parse_command("/lang"), Command::Language(None));
        assert_eq!(
            parse_command("/model  claude-haiku-4.5 "),
            Command::Model(Some("claude-haiku-4.5".to_string()))
        );
        assert_eq!(parse_command("/model"), Command::Model(None));
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse_command("/new"), Command::NewSession);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/bogus"), Command::Unknown("bogus".to_string()));
    }
}
