use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for this panel's commands")]
    Unknown(String),
    #[error("`{verb}` needs {what}")]
    MissingArg { verb: String, what: &'static str },
    #[error("`{value}` is not a valid {what}")]
    BadArg { value: String, what: &'static str },
}

/// One input line split into a verb and its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub args: Vec<String>,
}

impl Command {
    /// `None` for blank lines. The verb is lowercased; arguments are kept as typed.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        Some(Command {
            verb,
            args: words.map(str::to_string).collect(),
        })
    }

    pub fn new(verb: &str, args: &[&str]) -> Command {
        Command {
            verb: verb.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn arg(&self, i: usize, what: &'static str) -> Result<&str, CommandError> {
        self.args
            .get(i)
            .map(String::as_str)
            .ok_or_else(|| CommandError::MissingArg {
                verb: self.verb.clone(),
                what,
            })
    }

    pub fn number<T: FromStr>(&self, i: usize, what: &'static str) -> Result<T, CommandError> {
        let raw = self.arg(i, what)?;
        raw.parse().map_err(|_| CommandError::BadArg {
            value: raw.to_string(),
            what,
        })
    }

    /// All arguments joined by single spaces; empty when there are none.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }

    pub fn unknown(&self) -> CommandError {
        CommandError::Unknown(self.verb.clone())
    }
}
