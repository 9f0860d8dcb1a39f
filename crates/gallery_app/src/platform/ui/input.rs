//! Terminal command parsing. Each line typed by the user becomes one command.

use gallery_core::Msg;

pub const HELP: &str = concat!(
    "commands: <enter>|more  album <tag>  all  search [text]  open <n>  ",
    "close  reload  help  quit"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    /// Open the n-th visible card (1-based); resolved against the current view.
    Open(usize),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        // Scrolling to the bottom of the listing.
        "" | "more" | "next" => Command::Msg(Msg::SentinelVisibility { intersecting: true }),
        "album" if rest.is_empty() => return Err("album needs a tag".to_string()),
        "album" => Command::Msg(Msg::AlbumSelected(rest.to_string())),
        "all" => Command::Msg(Msg::ShowAllClicked),
        "search" => Command::Msg(Msg::SearchChanged(rest.to_string())),
        "open" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Command::Open(n),
            _ => return Err(format!("open needs a card number, got {rest:?}")),
        },
        "close" => Command::Msg(Msg::DetailClosed),
        "reload" => Command::Msg(Msg::Reload),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(command)
}
