use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub(crate) const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Clear history, keeping the role"),
    ("/config", "Show session settings"),
    ("/disable", "Remove a session attribute"),
    ("/enable", "Add a session attribute"),
    ("/help", "Show available commands"),
    ("/history", "Show the conversation so far"),
    ("/limit", "Set how many messages are kept"),
    ("/quit", "Save the session and exit"),
    ("/role", "Set the assistant role (clears history)"),
    ("/save", "Save the session now"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Config,
    Disable(Option<String>),
    Enable(Option<String>),
    Help,
    History,
    Limit(Option<String>),
    Quit,
    Role(Option<String>),
    Save,
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "clear" => SlashCommand::Clear,
        "config" => SlashCommand::Config,
        "disable" => SlashCommand::Disable(argument),
        "enable" => SlashCommand::Enable(argument),
        "help" => SlashCommand::Help,
        "history" => SlashCommand::History,
        "limit" => SlashCommand::Limit(argument),
        "quit" | "exit" | "q" => SlashCommand::Quit,
        "role" => SlashCommand::Role(argument),
        "save" => SlashCommand::Save,
        _ => SlashCommand::Unknown(cmd.split_whitespace().collect::<Vec<_>>().join(" ")),
    };
    Input::Command(command)
}
