use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::llm::{Completion, RequestExecutor};
use crate::session::{Session, SessionStore};
use crate::ui::{Spinner, Style};

/// Whether the REPL keeps reading input after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive conversation on a stored session.
///
/// The session is written back to the store on `/save` and when the loop ends.
pub struct ChatRepl {
    session: Session,
    store: SessionStore,
    executor: RequestExecutor,
    provider_name: String,
    model: String,
}

impl ChatRepl {
    pub fn new(
        session: Session,
        store: SessionStore,
        executor: RequestExecutor,
        provider_name: String,
        model: String,
    ) -> Self {
        Self {
            session,
            store,
            executor,
            provider_name,
            model,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.session);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if self.handle_command(cmd) == Flow::Quit {
                            break;
                        }
                    }
                    Input::Text(text) => self.ask_and_print(&text).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => {
                    self.save();
                    return Err(e.into());
                }
            }
        }

        self.save();
        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> Flow {
        match cmd {
            SlashCommand::Clear => {
                self.session.clear_history();
                ui::print_success("History cleared");
            }
            SlashCommand::Config => {
                ui::print_config(&self.session, &self.provider_name, &self.model);
            }
            SlashCommand::Disable(name) => match name {
                Some(name) => {
                    self.session.deconfigure(&name);
                    ui::print_success(&format!("Disabled {}", Style::value(&name)));
                }
                None => ui::print_error("Usage: /disable <attribute>"),
            },
            SlashCommand::Enable(name) => match name {
                Some(name) => {
                    self.session.configure(&name);
                    ui::print_success(&format!("Enabled {}", Style::value(&name)));
                }
                None => ui::print_error("Usage: /enable <attribute>"),
            },
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => ui::print_history(self.session.messages()),
            SlashCommand::Limit(value) => self.set_limit(value.as_deref()),
            SlashCommand::Quit => return Flow::Quit,
            SlashCommand::Role(role) => match role {
                Some(role) => {
                    self.session.set_role(&role);
                    ui::print_success(&format!(
                        "Role set to {} (history cleared)",
                        Style::value(&role)
                    ));
                }
                None => ui::print_error("Usage: /role <description>"),
            },
            SlashCommand::Save => {
                if self.save() {
                    ui::print_success("Session saved");
                }
            }
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        Flow::Continue
    }

    fn set_limit(&mut self, value: Option<&str>) {
        match value.map(str::parse::<usize>) {
            Some(Ok(limit)) => {
                self.session.set_message_limit(limit);
                ui::print_success(&format!(
                    "Message limit set to {}",
                    Style::value(limit)
                ));
            }
            Some(Err(_)) | None => ui::print_error("Usage: /limit <number>"),
        }
    }

    /// Writes the session back, reporting failure without aborting the REPL.
    fn save(&self) -> bool {
        match self.store.writeback(&self.session) {
            Ok(()) => true,
            Err(e) => {
                ui::print_error(&e.to_string());
                false
            }
        }
    }

    async fn ask_and_print(&mut self, text: &str) {
        let spinner = Spinner::new("Thinking...");
        let outcome = self.session.ask(&self.executor, text).await;
        spinner.stop();

        match outcome {
            Completion::Reply(reply) => {
                println!("{reply}");
                println!();
            }
            Completion::Failed(failure) => ui::print_error(&failure.to_string()),
        }
    }
}
