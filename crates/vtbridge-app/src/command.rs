//! Console commands read from stdin.
//!
//! Plain lines go to the shell verbatim. Lines starting with `:` are
//! bridge commands:
//!
//! - `:key <name> [mods]` sends an encoded key, e.g. `:key c ctrl`
//! - `:paste <text>` pastes text through the safety scanner
//! - `:start` restarts a stopped session
//! - `:stop` stops the session
//! - `:quit` exits
//!
//! `::text` sends the literal line `:text`.

use vtbridge_input::{Key, Modifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Line(String),
    Key { key: Key, mods: Modifiers },
    Paste(String),
    Start,
    Stop,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command ':{0}'")]
    UnknownCommand(String),
    #[error("usage: :key <name> [mods]")]
    MissingKey,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("unknown modifiers '{0}'")]
    UnknownModifier(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Line(line.to_string()));
    };
    if rest.starts_with(':') {
        return Ok(Command::Line(rest.to_string()));
    }

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim_start()),
        None => (rest, ""),
    };

    match name {
        "key" | "k" => parse_key(arg),
        "paste" | "p" => Ok(Command::Paste(arg.to_string())),
        "start" => Ok(Command::Start),
        "stop" => Ok(Command::Stop),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_key(arg: &str) -> Result<Command, ParseError> {
    let (name, mods) = match arg.trim().split_once(char::is_whitespace) {
        Some((name, mods)) => (name, mods),
        None => (arg.trim(), ""),
    };
    if name.is_empty() {
        return Err(ParseError::MissingKey);
    }
    let key = Key::from_name(name).ok_or_else(|| ParseError::UnknownKey(name.to_string()))?;
    let mods =
        Modifiers::parse(mods).ok_or_else(|| ParseError::UnknownModifier(mods.trim().to_string()))?;
    Ok(Command::Key { key, mods })
}
