use thiserror::Error;

use crate::models::language::Language;

const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Name, argument hint and description of every slash command, in help order.
pub const COMMANDS: [(&str, &str, &str); 17] = [
    ("help", "", "show this list"),
    ("lang", "[en|hi]", "switch language (toggles when no code is given)"),
    ("chat", "", "open or close the assistant"),
    ("voice", "", "turn spoken replies on or off"),
    ("stop", "", "stop speaking"),
    ("listen", "", "speak a message instead of typing it"),
    ("say", "<n>", "read the n-th assistant message aloud"),
    ("ask", "<n>", "send the n-th suggestion to the assistant"),
    ("schemes", "", "show the scheme catalog"),
    ("category", "<id>", "only show one category"),
    ("all", "", "clear the category filter and search"),
    ("search", "<query>", "search schemes by title or description"),
    ("scheme", "<id>", "open the details of a scheme"),
    ("back", "", "return to the catalog"),
    ("apply", "[id]", "get help applying for a scheme"),
    ("profile", "", "show your registration details"),
    ("quit", "", "leave"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Lang(Option<Language>),
    Chat,
    Voice,
    Stop,
    Listen,
    /// 1-based position among the assistant's messages.
    Say(usize),
    /// 1-based position in the last suggestion list shown.
    Ask(usize),
    Schemes,
    Category(String),
    All,
    Search(String),
    Scheme(String),
    Back,
    Apply(Option<String>),
    Profile,
    Quit,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(Command),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '/{name}'{}", did_you_mean(.suggestion))]
    Unknown {
        name: String,
        suggestion: Option<&'static str>,
    },
    #[error("'/{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'/{command}' does not accept '{value}'")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

fn did_you_mean(suggestion: &Option<&str>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean '/{}'?", name),
        None => String::new(),
    }
}

/// Plain text is returned exactly as typed; only commands are normalized.
pub fn parse_input(line: &str) -> Result<Input, CommandError> {
    match line.trim().strip_prefix('/') {
        Some(rest) => parse_command(rest).map(Input::Command),
        None => Ok(Input::Text(line.to_string())),
    }
}

fn parse_command(rest: &str) -> Result<Command, CommandError> {
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let name = name.to_lowercase();

    let command = match name.as_str() {
        "help" | "?" => Command::Help,
        "lang" => {
            if arg.is_empty() {
                Command::Lang(None)
            } else {
                let language = arg.parse::<Language>().map_err(|_| CommandError::InvalidArgument {
                    command: "lang",
                    value: arg.to_string(),
                })?;
                Command::Lang(Some(language))
            }
        }
        "chat" => Command::Chat,
        "voice" => Command::Voice,
        "stop" => Command::Stop,
        "listen" => Command::Listen,
        "say" => Command::Say(position(arg, "say", "a message number")?),
        "ask" => Command::Ask(position(arg, "ask", "a suggestion number")?),
        "schemes" | "home" => Command::Schemes,
        "category" => Command::Category(required(arg, "category", "a category id")?.to_lowercase()),
        "all" => Command::All,
        "search" => Command::Search(required(arg, "search", "a query")?.to_string()),
        "scheme" => Command::Scheme(required(arg, "scheme", "a scheme id")?.to_lowercase()),
        "back" => Command::Back,
        "apply" => Command::Apply((!arg.is_empty()).then(|| arg.to_lowercase())),
        "profile" => Command::Profile,
        "quit" | "exit" => Command::Quit,
        _ => {
            return Err(CommandError::Unknown {
                suggestion: suggest(&name),
                name,
            });
        }
    };
    Ok(command)
}

fn required<'a>(
    arg: &'a str,
    command: &'static str,
    argument: &'static str
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(arg)
}

fn position(arg: &str, command: &'static str, argument: &'static str) -> Result<usize, CommandError> {
    let n = required(arg, command, argument)?;
    match n.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ =>
            Err(CommandError::InvalidArgument {
                command,
                value: n.to_string(),
            }),
    }
}

/// Closest command name by Jaro-Winkler similarity, if it is close enough.
pub fn suggest(name: &str) -> Option<&'static str> {
    let mut best: Option<&'static str> = None;
    let mut best_score = 0.0;
    for &(candidate, _, _) in COMMANDS.iter() {
        let score = strsim::jaro_winkler(name, candidate);
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }
    if best_score >= SUGGESTION_THRESHOLD {
        return best;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_kept_as_typed() {
        assert_eq!(parse_input("  pm kisan  "), Ok(Input::Text("  pm kisan  ".into())));
        assert_eq!(parse_input("987654321 "), Ok(Input::Text("987654321 ".into())));
        assert_eq!(parse_input(""), Ok(Input::Text(String::new())));
        // leading spaces do not hide a command
        assert_eq!(parse_input("  /chat"), Ok(Input::Command(Command::Chat)));
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_input("/lang hi"), Ok(Input::Command(Command::Lang(Some(Language::Hi)))));
        assert_eq!(parse_input("/LANG"), Ok(Input::Command(Command::Lang(None))));
        assert_eq!(parse_input("/say 2"), Ok(Input::Command(Command::Say(2))));
        assert_eq!(parse_input("/ask 3"), Ok(Input::Command(Command::Ask(3))));
        assert_eq!(
            parse_input("/search crop insurance"),
            Ok(Input::Command(Command::Search("crop insurance".into())))
        );
        assert_eq!(parse_input("/scheme PM-KISAN"), Ok(Input::Command(Command::Scheme("pm-kisan".into()))));
        assert_eq!(parse_input("/apply"), Ok(Input::Command(Command::Apply(None))));
        assert_eq!(parse_input("/exit"), Ok(Input::Command(Command::Quit)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse_input("/say"),
            Err(CommandError::MissingArgument { command: "say", argument: "a message number" })
        );
        assert_eq!(
            parse_input("/say 0"),
            Err(CommandError::InvalidArgument { command: "say", value: "0".into() })
        );
        assert_eq!(
            parse_input("/ask two"),
            Err(CommandError::InvalidArgument { command: "ask", value: "two".into() })
        );
        assert!(matches!(parse_input("/lang fr"), Err(CommandError::InvalidArgument { command: "lang", .. })));
    }

    #[test]
    fn unknown_command_suggests_closest() {
        let err = parse_input("/serach farmers").unwrap_err();
        assert_eq!(err, CommandError::Unknown { name: "serach".into(), suggestion: Some("search") });
        assert_eq!(err.to_string(), "Unknown command '/serach', did you mean '/search'?");

        assert_eq!(suggest("lnag"), Some("lang"));
        assert_eq!(suggest("zzz"), None);
    }

    #[test]
    fn command_table_matches_parser() {
        for (name, hint, _) in COMMANDS.iter() {
            let line = match *hint {
                "<n>" => format!("/{} 1", name),
                h if h.starts_with('<') => format!("/{} x", name),
                _ => format!("/{}", name),
            };
            assert!(parse_input(&line).is_ok(), "{} should parse", line);
        }
    }
}
