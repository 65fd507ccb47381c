//! Report commands.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{Error, Result};

/// The six reports the analyzer can produce.
///
/// Command-line names are the kebab-case variant names (`list-tick`,
/// `last-price`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Command {
    /// Distinct tickers, sorted
    ListTick,
    /// Sell proceeds minus buy cost over all records
    Profit,
    /// Value of held positions, largest first
    Pos,
    /// Last known price per ticker
    LastPrice,
    /// Histogram of record counts per ticker
    HistOrd,
    /// Bar graph of position values per ticker
    GraphPos,
}

impl Command {
    /// Looks up a command by its exact command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name, false).ok()
    }

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Command::ListTick => "list-tick",
            Command::Profit => "profit",
            Command::Pos => "pos",
            Command::LastPrice => "last-price",
            Command::HistOrd => "hist-ord",
            Command::GraphPos => "graph-pos",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split positional words into the command and the log paths.
///
/// A word naming a command selects it; every other word is a log path.
/// Naming two commands is an error.
pub fn split_command<I>(words: I) -> Result<(Option<Command>, Vec<PathBuf>)>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut command: Option<Command> = None;
    let mut logs = Vec::new();

    for word in words {
        match word.to_str().and_then(Command::from_name) {
            Some(found) => {
                if let Some(first) = command {
                    return Err(Error::MultipleCommands {
                        first: first.to_string(),
                        second: found.to_string(),
                    });
                }
                command = Some(found);
            }
            None => logs.push(word),
        }
    }

    Ok((command, logs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for cmd in Command::value_variants() {
            assert_eq!(Command::from_name(cmd.name()), Some(*cmd));
        }
    }

    #[test]
    fn clap_names_match() {
        for cmd in Command::value_variants() {
            let possible = cmd.to_possible_value().unwrap();
            assert_eq!(possible.get_name(), cmd.name());
        }
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Command::from_name("stock.log"), None);
        assert_eq!(Command::from_name("PROFIT"), None);
        assert_eq!(Command::from_name(""), None);
    }

    fn words(ws: &[&str]) -> Vec<PathBuf> {
        ws.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn split_command_anywhere() {
        let (cmd, logs) = split_command(words(&["a.log", "profit", "b.log.gz"])).unwrap();
        assert_eq!(cmd, Some(Command::Profit));
        assert_eq!(logs, words(&["a.log", "b.log.gz"]));
    }

    #[test]
    fn split_without_command() {
        let (cmd, logs) = split_command(words(&["a.log"])).unwrap();
        assert_eq!(cmd, None);
        assert_eq!(logs, words(&["a.log"]));

        let (cmd, logs) = split_command(Vec::new()).unwrap();
        assert_eq!(cmd, None);
        assert!(logs.is_empty());
    }

    #[test]
    fn split_rejects_two_commands() {
        let err = split_command(words(&["pos", "a.log", "profit"])).unwrap_err();
        assert!(matches!(
            err,
            Error::MultipleCommands { ref first, ref second } if first == "pos" && second == "profit"
        ));
    }

    #[test]
    fn split_rejects_repeated_command() {
        assert!(split_command(words(&["pos", "pos"])).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Command::GraphPos.to_string(), "graph-pos");
    }
}
