//! Button command protocol.
//!
//! Button payloads travel over the wire as `verb` or `verb_<id>` strings.
//! They are parsed exactly once, at the transport boundary, into a typed
//! [`Command`]; unknown verbs and unparsable ids are a distinct error kind
//! instead of an uncontrolled parse failure deep in a handler.

use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileField;

/// A parsed button-press command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the profile creation dialog.
    CreateProfile,
    /// Show the edit-field menu.
    EditProfile,
    /// Start an edit dialog for the game field.
    ChangeGame,
    /// Start an edit dialog for the rank field.
    ChangeRank,
    /// Start an edit dialog for the description field.
    ChangeDescription,
    /// Hide the profile from browsing users.
    StopSearch,
    /// Make the profile visible again and browse from the start.
    ResumeSearch,
    /// Show the user their own profile card.
    ShowMyProfile,
    /// Show the user's invite history.
    InviteHistory,
    /// Return to the main menu.
    MainMenu,
    /// Show the candidate at this browse offset.
    Next(u32),
    /// Send an ally invite to this user.
    Invite(UserId),
    /// File a report against this user.
    Report(UserId),
    /// Accept the pending invite from this user.
    Accept(UserId),
    /// Decline the pending invite from this user.
    Decline(UserId),
}

/// Errors from parsing a button payload.
#[derive(Debug, Clone, Error)]
pub enum CommandParseError {
    #[error("Unknown command verb: '{0}'")]
    UnknownVerb(String),

    #[error("Command '{verb}' has malformed id '{raw}'")]
    MalformedId {
        verb: &'static str,
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Command '{verb}' is missing its id")]
    MissingId { verb: &'static str },
}

impl Command {
    /// Parses a wire payload into a command.
    pub fn parse(payload: &str) -> Result<Self, CommandParseError> {
        match payload {
            "create_profile" => return Ok(Command::CreateProfile),
            "edit_profile" => return Ok(Command::EditProfile),
            "change_game" => return Ok(Command::ChangeGame),
            "change_rank" => return Ok(Command::ChangeRank),
            "change_description" => return Ok(Command::ChangeDescription),
            "stop_search" => return Ok(Command::StopSearch),
            "resume_search" => return Ok(Command::ResumeSearch),
            "show_my_profile" => return Ok(Command::ShowMyProfile),
            "invite_history" => return Ok(Command::InviteHistory),
            "main_menu" => return Ok(Command::MainMenu),
            _ => {}
        }

        // `verb_<id>` forms; ids attach after the verb's trailing underscore.
        if let Some(raw) = payload.strip_prefix("next_") {
            return Ok(Command::Next(parse_offset("next", raw)?));
        }
        if let Some(raw) = payload.strip_prefix("invite_") {
            return Ok(Command::Invite(parse_user("invite", raw)?));
        }
        if let Some(raw) = payload.strip_prefix("report_") {
            return Ok(Command::Report(parse_user("report", raw)?));
        }
        if let Some(raw) = payload.strip_prefix("accept_") {
            return Ok(Command::Accept(parse_user("accept", raw)?));
        }
        if let Some(raw) = payload.strip_prefix("decline_") {
            return Ok(Command::Decline(parse_user("decline", raw)?));
        }

        Err(CommandParseError::UnknownVerb(payload.to_string()))
    }

    /// Renders the command back to its wire payload.
    pub fn encode(&self) -> String {
        match self {
            Command::CreateProfile => "create_profile".to_string(),
            Command::EditProfile => "edit_profile".to_string(),
            Command::ChangeGame => "change_game".to_string(),
            Command::ChangeRank => "change_rank".to_string(),
            Command::ChangeDescription => "change_description".to_string(),
            Command::StopSearch => "stop_search".to_string(),
            Command::ResumeSearch => "resume_search".to_string(),
            Command::ShowMyProfile => "show_my_profile".to_string(),
            Command::InviteHistory => "invite_history".to_string(),
            Command::MainMenu => "main_menu".to_string(),
            Command::Next(offset) => format!("next_{}", offset),
            Command::Invite(id) => format!("invite_{}", id),
            Command::Report(id) => format!("report_{}", id),
            Command::Accept(id) => format!("accept_{}", id),
            Command::Decline(id) => format!("decline_{}", id),
        }
    }

    /// The profile field a change command addresses, if any.
    pub fn edited_field(&self) -> Option<ProfileField> {
        match self {
            Command::ChangeGame => Some(ProfileField::Game),
            Command::ChangeRank => Some(ProfileField::Rank),
            Command::ChangeDescription => Some(ProfileField::Description),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

fn parse_offset(verb: &'static str, raw: &str) -> Result<u32, CommandParseError> {
    if raw.is_empty() {
        return Err(CommandParseError::MissingId { verb });
    }
    raw.parse().map_err(|source| CommandParseError::MalformedId {
        verb,
        raw: raw.to_string(),
        source,
    })
}

fn parse_user(verb: &'static str, raw: &str) -> Result<UserId, CommandParseError> {
    if raw.is_empty() {
        return Err(CommandParseError::MissingId { verb });
    }
    raw.parse()
        .map(UserId::new)
        .map_err(|source| CommandParseError::MalformedId {
            verb,
            raw: raw.to_string(),
            source,
        })
}
