//! REPL command parsing.

use std::path::PathBuf;

use nutrisync_core::form::FormField;

/// Command names offered for completion.
pub const COMMANDS: &[&str] = &[
    "/set", "/submit", "/water", "/chat", "/track", "/food", "/restart", "/show", "/help",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { field: FormField, value: String },
    Submit,
    Water,
    Chat(String),
    Track(String),
    Food(PathBuf),
    Restart,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Bare text is sent to the chat.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Command::Quit);
        }
        if !line.starts_with('/') {
            return Ok(Command::Chat(line.to_string()));
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("Usage: /set <age|weight|height|goal|activity> <value>".into());
                }
                let field = FormField::parse(field).map_err(|e| e.to_string())?;
                Ok(Command::Set {
                    field,
                    value: value.to_string(),
                })
            }
            "/submit" => Ok(Command::Submit),
            "/water" => Ok(Command::Water),
            "/chat" => Ok(Command::Chat(rest.to_string())),
            "/track" if !rest.is_empty() => Ok(Command::Track(rest.to_string())),
            "/track" => Err("Usage: /track <weight>".into()),
            "/food" if !rest.is_empty() => Ok(Command::Food(PathBuf::from(rest))),
            "/food" => Err("Usage: /food <image path>".into()),
            "/restart" => Ok(Command::Restart),
            "/show" => Ok(Command::Show),
            "/help" => Ok(Command::Help),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            Command::parse("/set weight 80.5"),
            Ok(Command::Set {
                field: FormField::Weight,
                value: "80.5".into()
            })
        );
        assert_eq!(
            Command::parse("/set goal muscle_gain"),
            Ok(Command::Set {
                field: FormField::Selection,
                value: "muscle_gain".into()
            })
        );
    }

    #[test]
    fn test_parse_set_without_value_clears_field() {
        assert_eq!(
            Command::parse("/set age"),
            Ok(Command::Set {
                field: FormField::Age,
                value: String::new()
            })
        );
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = Command::parse("/set shoe_size 44").unwrap_err();
        assert!(err.contains("shoe_size"));
    }

    #[test]
    fn test_bare_text_is_chat() {
        assert_eq!(
            Command::parse("what should I eat?"),
            Ok(Command::Chat("what should I eat?".into()))
        );
        assert_eq!(Command::parse("/chat hi"), Ok(Command::Chat("hi".into())));
    }

    #[test]
    fn test_parse_arguments_required() {
        assert!(Command::parse("/track").is_err());
        assert!(Command::parse("/food").is_err());
        assert_eq!(
            Command::parse("/food ./lunch.jpg"),
            Ok(Command::Food(PathBuf::from("./lunch.jpg")))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert_eq!(Command::parse("/water"), Ok(Command::Water));
        assert_eq!(Command::parse("/restart"), Ok(Command::Restart));
        assert!(Command::parse("/plan").is_err());
    }
}
