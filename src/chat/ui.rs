//! Chat mode UI components.

use super::command::SLASH_COMMANDS;
use crate::llm::Message;
use crate::session::Session;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(session: &Session) {
    println!(
        "{} {} - Conversation {}",
        Style::header("texlate"),
        Style::version(format!("v{VERSION}")),
        Style::value(session.id())
    );
    println!("{}", Style::secondary(session.role_instruction()));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(session: &Session, provider: &str, model: &str) {
    println!("{}", Style::header("Session"));
    println!("  {}    {}", Style::label("session"), Style::value(session.id()));
    println!("  {}   {}", Style::label("provider"), Style::value(provider));
    println!("  {}      {}", Style::label("model"), Style::value(model));
    println!(
        "  {}      {}",
        Style::label("limit"),
        Style::value(session.limit())
    );
    println!(
        "  {}   {}",
        Style::label("messages"),
        Style::value(session.messages().len() - 1)
    );
    let attributes = if session.attributes().is_empty() {
        Style::secondary("(none)")
    } else {
        Style::value(
            session
                .attributes()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    };
    println!("  {} {}", Style::label("attributes"), attributes);
    println!();
}

pub fn print_history(messages: &[Message]) {
    for message in messages {
        println!("{} {}", Style::role(format!("[{}]", message.role)), message.content);
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (command, description) in SLASH_COMMANDS {
        println!(
            "  {:10} {}",
            Style::command(command),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
