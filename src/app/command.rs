//! Line-oriented command parsing.
//!
//! Plain text starts a search. Lines beginning with `:` are commands:
//!
//! | Input               | Event                         |
//! |---------------------|-------------------------------|
//! | `:more`, `:m`       | [`Event::LoadMore`]           |
//! | `:open N`, `:o ID`  | [`Event::SelectResult`]       |
//! | `:history [filter]` | [`Event::ShowHistory`]        |
//! | `:recall N`, `:r N` | [`Event::RecallHistory`]      |
//! | `:clear`            | [`Event::ClearHistory`]       |
//! | `:theme`, `:t`      | [`Event::ToggleTheme`]        |
//! | `:back`, `:b`       | [`Event::CloseDetail`]        |
//! | `:help`, `:?`       | [`Event::Help`]               |
//! | `:quit`, `:q`       | [`Event::Quit`]               |

use super::handler::{Event, ResultRef};

/// Why an input line could not be turned into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command \":{0}\". Type :help for the list of commands")]
    Unknown(String),

    #[error(":{command} needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("\"{0}\" is not a valid number")]
    NotANumber(String),
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines so the prompt can simply be redrawn.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands or malformed arguments.
pub fn parse_command(line: &str) -> Result<Option<Event>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(Event::SubmitSearch(line.to_string())));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let event = match name.to_ascii_lowercase().as_str() {
        "more" | "m" => Event::LoadMore,
        "open" | "o" => Event::SelectResult(parse_result_ref(arg)?),
        "history" | "h" => Event::ShowHistory {
            filter: arg.to_string(),
        },
        "recall" | "r" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "recall",
                    expected: "a history number",
                });
            }
            Event::RecallHistory(parse_number(arg)?)
        }
        "clear" => Event::ClearHistory,
        "theme" | "t" => Event::ToggleTheme,
        "back" | "b" => Event::CloseDetail,
        "help" | "?" => Event::Help,
        "quit" | "q" | "exit" => Event::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    Ok(Some(event))
}

fn parse_result_ref(arg: &str) -> Result<ResultRef, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "open",
            expected: "a result number or title id",
        });
    }

    if arg.chars().all(|c| c.is_ascii_digit()) {
        return parse_number(arg).map(ResultRef::Index);
    }

    Ok(ResultRef::Id(arg.to_string()))
}

fn parse_number(arg: &str) -> Result<usize, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}
