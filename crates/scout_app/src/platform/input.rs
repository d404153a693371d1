use std::path::PathBuf;

use scout_core::{Application, ConversationId, FilterField, Msg, PositionId, UserId};
use thiserror::Error;

pub const HELP: &str = "\
text                 search listings
:stage|:category|:location VALUE   pick a filter (\"all\" clears it)
:reset               clear all filters
:user ID             show the action offered for a user
:position ID OWNER   show the action offered for a position
:connect ID          record a sent connection request
:accept ID           record an accepted connection
:apply POSITION      record a sent application
:chat ID | :close    open or close a conversation
:upload PATH         upload a file
:help | :quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    ShowUser(UserId),
    ShowPosition { position: PositionId, owner: UserId },
    Upload(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `:{0}`, try :help")]
    UnknownCommand(String),
    #[error("`:{command}` needs {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
}

/// Lines not starting with `:` are free text and are passed through untrimmed.
pub fn parse_line(line: &str) -> Result<Command, InputError> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Dispatch(Msg::TextChanged(line.to_string())));
    };

    let (name, arg) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };
    let require = |expected: &'static str| {
        if arg.is_empty() {
            Err(InputError::MissingArgument {
                command: name.to_string(),
                expected,
            })
        } else {
            Ok(arg)
        }
    };

    if let Some(field) = FilterField::parse(name) {
        return Ok(Command::Dispatch(Msg::FilterChanged {
            field,
            value: require("a value")?.to_string(),
        }));
    }

    let command = match name {
        "reset" => Command::Dispatch(Msg::FiltersReset),
        "user" => Command::ShowUser(UserId::new(require("a user id")?)),
        "position" => {
            let mut parts = require("a position id and an owner id")?.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(position), Some(owner)) => Command::ShowPosition {
                    position: PositionId::new(position),
                    owner: UserId::new(owner),
                },
                _ => {
                    return Err(InputError::MissingArgument {
                        command: name.to_string(),
                        expected: "a position id and an owner id",
                    })
                }
            }
        }
        "connect" => {
            let target = UserId::new(require("a user id")?);
            Command::Dispatch(Msg::ConnectionRequestSent(target))
        }
        "accept" => {
            let target = UserId::new(require("a user id")?);
            Command::Dispatch(Msg::ConnectionAccepted(target))
        }
        "apply" => {
            let position = require("a position id")?;
            Command::Dispatch(Msg::ApplicationSubmitted(Application {
                id: format!("local-{position}"),
                position_id: PositionId::new(position),
            }))
        }
        "chat" => {
            let conversation = ConversationId::new(require("a conversation id")?);
            Command::Dispatch(Msg::ConversationOpened(conversation))
        }
        "close" => Command::Dispatch(Msg::ConversationClosed),
        "upload" => Command::Upload(PathBuf::from(require("a file path")?)),
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}
