use crate::utils::error::{CdsError, Result};
use crate::utils::validation::{normalize_letter, validate_non_empty_string};

/// One line of input in the interactive browse loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Quit,
    Help,
    All,
    Letter(char),
    Next,
    Previous,
    Page(usize),
    Show(String),
    Search(String),
}

fn usage(text: &str) -> CdsError {
    CdsError::ValidationError {
        message: format!("usage: {}", text),
    }
}

impl BrowseCommand {
    /// Anything not starting with a known `:` command is a search term.
    pub fn parse(line: &str) -> Result<Self> {
        let input = line.trim();
        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd {
            ":quit" | ":q" => Ok(BrowseCommand::Quit),
            ":help" => Ok(BrowseCommand::Help),
            ":all" => Ok(BrowseCommand::All),
            ":next" => Ok(BrowseCommand::Next),
            ":prev" => Ok(BrowseCommand::Previous),
            ":letter" => {
                let mut chars = arg.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(BrowseCommand::Letter(normalize_letter(c)?)),
                    _ => Err(usage(":letter X")),
                }
            }
            ":page" => arg
                .parse::<usize>()
                .map(BrowseCommand::Page)
                .map_err(|_| usage(":page N")),
            ":show" => {
                validate_non_empty_string(":show ID", arg)?;
                Ok(BrowseCommand::Show(arg.to_string()))
            }
            _ => Ok(BrowseCommand::Search(input.to_string())),
        }
    }
}
