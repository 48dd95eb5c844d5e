use crate::events::AppEvent;
use crate::gui::Section;
use derive_more::Display;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/showcase.sock";

/// One line of the control socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RemoteCommand {
    #[display("next")]
    Next,
    #[display("prev")]
    Prev,
    #[display("goto {_0}")]
    GoTo(i64),
    #[display("close")]
    Close,
    #[display("theme")]
    Theme,
    #[display("show {_0}")]
    Show(Section),
}

#[derive(Error, Debug, PartialEq)]
pub enum RemoteError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid argument '{0}'")]
    InvalidArgument(String),
}

impl FromStr for RemoteCommand {
    type Err = RemoteError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(RemoteError::Empty)?;
        let arg = words.next();

        match command {
            "next" => Ok(Self::Next),
            "prev" | "previous" => Ok(Self::Prev),
            "close" => Ok(Self::Close),
            "theme" => Ok(Self::Theme),
            "goto" => {
                let arg = arg.ok_or(RemoteError::MissingArgument("goto"))?;
                arg.parse()
                    .map(Self::GoTo)
                    .map_err(|_| RemoteError::InvalidArgument(arg.to_string()))
            }
            "show" => {
                let arg = arg.ok_or(RemoteError::MissingArgument("show"))?;
                arg.parse()
                    .map(Self::Show)
                    .map_err(|_| RemoteError::InvalidArgument(arg.to_string()))
            }
            other => Err(RemoteError::Unknown(other.to_string())),
        }
    }
}

impl From<RemoteCommand> for AppEvent {
    fn from(command: RemoteCommand) -> Self {
        match command {
            RemoteCommand::Next => AppEvent::Next,
            RemoteCommand::Prev => AppEvent::Prev,
            RemoteCommand::GoTo(i) => AppEvent::GoTo(i),
            RemoteCommand::Close => AppEvent::Close,
            RemoteCommand::Theme => AppEvent::ToggleTheme,
            RemoteCommand::Show(section) => AppEvent::Show(section),
        }
    }
}

pub fn send_command(command: RemoteCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to showcase at {}: {}. Is showcase running?",
            SOCKET_PATH,
            e
        )
    })?;
    writeln!(stream, "{}", command)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("next", RemoteCommand::Next),
            ("  prev ", RemoteCommand::Prev),
            ("previous", RemoteCommand::Prev),
            ("goto 3", RemoteCommand::GoTo(3)),
            ("goto -7", RemoteCommand::GoTo(-7)),
            ("close", RemoteCommand::Close),
            ("theme", RemoteCommand::Theme),
            ("show projects", RemoteCommand::Show(Section::Projects)),
            ("show About", RemoteCommand::Show(Section::About)),
        ];
        for (line, expected) in cases {
            assert_eq!(line.parse::<RemoteCommand>(), Ok(expected), "{line}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<RemoteCommand>(), Err(RemoteError::Empty));
        assert_eq!(
            "spin".parse::<RemoteCommand>(),
            Err(RemoteError::Unknown("spin".to_string()))
        );
        assert_eq!(
            "goto".parse::<RemoteCommand>(),
            Err(RemoteError::MissingArgument("goto"))
        );
        assert_eq!(
            "goto two".parse::<RemoteCommand>(),
            Err(RemoteError::InvalidArgument("two".to_string()))
        );
        assert!("show contact".parse::<RemoteCommand>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for command in [
            RemoteCommand::Next,
            RemoteCommand::GoTo(-2),
            RemoteCommand::Show(Section::Skills),
        ] {
            assert_eq!(command.to_string().parse::<RemoteCommand>(), Ok(command));
        }
    }

    #[test]
    fn test_into_event() {
        assert_eq!(AppEvent::from(RemoteCommand::Theme), AppEvent::ToggleTheme);
        assert_eq!(AppEvent::from(RemoteCommand::GoTo(4)), AppEvent::GoTo(4));
    }
}
