//! Shell command parsing

use std::path::PathBuf;

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record `key` at playback position `position_ms`
    Key { key: char, position_ms: u64 },
    Select(usize),
    Delete,
    Undo,
    Redo,
    Search(String),
    Show,
    Sort,
    Stats,
    Offset(String),
    Export(Option<PathBuf>),
    /// `clear` without `yes` only asks for confirmation
    Clear { confirmed: bool },
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  key <k> <ms>     record key k at playback position ms
  select <n>       highlight line n and print its playback position
  delete           delete the highlighted line, or the last line
  undo | redo      undo or redo the last delete
  search <text>    highlight lines containing text (any case)
  show | sort      print the log | re-sort it
  stats            per-key counts and time span
  offset <time>    set the start offset (HH:MM:SS, MM:SS or SS)
  export [path]    copy the log verbatim
  clear yes        empty the log
  quit";

impl Command {
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        match word.to_lowercase().as_str() {
            "key" | "k" => {
                let mut args = rest.split_whitespace();
                let key = args
                    .next()
                    .and_then(single_char)
                    .ok_or("usage: key <k> <ms>")?;
                let position_ms = args
                    .next()
                    .and_then(|ms| ms.parse().ok())
                    .ok_or("usage: key <k> <ms>")?;
                Ok(Command::Key { key, position_ms })
            }
            "select" | "sel" => rest
                .parse()
                .map(Command::Select)
                .map_err(|_| "usage: select <line>".to_string()),
            "delete" | "del" => Ok(Command::Delete),
            "undo" => Ok(Command::Undo),
            "redo" => Ok(Command::Redo),
            "search" | "find" => Ok(Command::Search(rest.to_string())),
            "show" | "ls" => Ok(Command::Show),
            "sort" => Ok(Command::Sort),
            "stats" => Ok(Command::Stats),
            "offset" | "start" if !rest.is_empty() => Ok(Command::Offset(rest.to_string())),
            "offset" | "start" => Err("usage: offset <HH:MM:SS>".to_string()),
            "export" => Ok(Command::Export(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "clear" => Ok(Command::Clear {
                confirmed: rest.eq_ignore_ascii_case("yes"),
            }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
