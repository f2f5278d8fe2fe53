//! Parsing of shell input lines.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    NewChat(Option<String>),
    ListChats,
    OpenChat(String),
    RenameChat(String),
    DeleteChat(Option<String>),
    History,
    ListMaps,
    ShowMap(Option<String>),
    GenerateMap(Option<String>),
    MapFromDocument { path: PathBuf, title: Option<String> },
    DeleteMap(Option<String>),
    Transcribe(PathBuf),
    Speak(Option<PathBuf>),
    ShowUser,
    SetUser { name: String, email: String },
    ClearUser,
    ClearAll,
    Quit,
    /// Anything not starting with `/`
    Say(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::Unknown(cmd) => write!(f, "unknown command /{} (try /help)", cmd),
            Self::Usage(usage) => write!(f, "usage: {}", usage),
        }
    }
}

pub const HELP: &str = "\
/new [title]           start a chat
/chats                 list chats, most recent first
/open <chat-id>        switch chat
/rename <title>        rename the active chat
/delete [chat-id]      delete a chat (default: active)
/history               show the active chat's messages
/maps                  list mind-maps of the active chat
/map [id]              show (and select) a mind-map
/mindmap [title]       generate a mind-map from the conversation
/doc <path> [title]    generate a mind-map from a document
/delmap [id]           delete a mind-map (default: active)
/transcribe <path>     transcribe audio and send it as a message
/speak [path]          synthesize the last reply to an audio file
/user [name email]     show or save the user profile; /user clear removes it
/clear                 delete every chat
/quit                  exit
anything else          talk to the assistant";

fn rest(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let Some(body) = line.strip_prefix('/') else {
            return Ok(Self::Say(line.to_string()));
        };

        let (name, arg) = body.split_once(char::is_whitespace).unwrap_or((body, ""));

        let command = match name {
            "help" | "h" => Self::Help,
            "new" => Self::NewChat(rest(arg)),
            "chats" => Self::ListChats,
            "open" => Self::OpenChat(rest(arg).ok_or(ParseError::Usage("/open <chat-id>"))?),
            "rename" => Self::RenameChat(rest(arg).ok_or(ParseError::Usage("/rename <title>"))?),
            "delete" => Self::DeleteChat(rest(arg)),
            "history" => Self::History,
            "maps" => Self::ListMaps,
            "map" => Self::ShowMap(rest(arg)),
            "mindmap" => Self::GenerateMap(rest(arg)),
            "doc" => {
                let arg = arg.trim();
                if arg.is_empty() {
                    return Err(ParseError::Usage("/doc <path> [title]"));
                }
                let (path, title) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                Self::MapFromDocument {
                    path: PathBuf::from(path),
                    title: rest(title),
                }
            }
            "delmap" => Self::DeleteMap(rest(arg)),
            "transcribe" => Self::Transcribe(
                rest(arg)
                    .map(PathBuf::from)
                    .ok_or(ParseError::Usage("/transcribe <path>"))?,
            ),
            "speak" => Self::Speak(rest(arg).map(PathBuf::from)),
            "user" => match arg.split_whitespace().collect::<Vec<_>>().as_slice() {
                [] => Self::ShowUser,
                ["clear"] => Self::ClearUser,
                [name @ .., email] if !name.is_empty() && email.contains('@') => Self::SetUser {
                    name: name.join(" "),
                    email: email.to_string(),
                },
                _ => return Err(ParseError::Usage("/user [name email] | /user clear")),
            },
            "clear" => Self::ClearAll,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
