use std::fmt;

/// External CLI tools dockergen drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Git,
    Gh,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Gh => "gh",
        }
    }

    fn install_hint(self) -> &'static str {
        match self {
            Self::Git => "https://git-scm.com/downloads",
            Self::Gh => "https://cli.github.com",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{tool} CLI not found, install: {}", .tool.install_hint())]
    NotFound {
        tool: Tool,
        source: std::io::Error,
    },

    #[error("{tool} command failed: {args:?}\n{stderr}")]
    CommandFailed {
        tool: Tool,
        args: Vec<String>,
        stderr: String,
    },

    #[error("{tool} output was not valid UTF-8")]
    InvalidUtf8 {
        tool: Tool,
        source: std::string::FromUtf8Error,
    },
}
