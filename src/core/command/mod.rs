//! Command lines and the plans that produce them.

pub mod formatter;

pub use formatter::build_plan;

use crate::core::descriptor::Launch;
use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program path followed by its argument tokens.
///
/// Tokens are handed to the OS unquoted; [`CommandLine::render`] quotes them
/// only for display and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Joins the executable name onto the install directory.
    /// An empty install directory leaves the bare name for PATH lookup.
    pub fn for_tool(install_dir: &Path, executable: &str) -> Self {
        if install_dir.as_os_str().is_empty() {
            Self::new(executable)
        } else {
            Self::new(install_dir.join(executable))
        }
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.args.push(token.into());
    }

    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.push(token);
        self
    }

    /// Program followed by arguments, unquoted.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    pub fn render(&self) -> String {
        self.tokens()
            .iter()
            .map(|token| quote_token(token).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Wraps tokens containing whitespace or quotes in double quotes.
pub fn quote_token(token: &str) -> Cow<'_, str> {
    if !token.is_empty() && !token.chars().any(|c| c.is_whitespace() || c == '"') {
        return Cow::Borrowed(token);
    }
    Cow::Owned(format!("\"{}\"", token.replace('"', "\\\"")))
}

/// File listing several inputs, one path per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFile {
    pub path: PathBuf,
    pub entries: Vec<PathBuf>,
}

impl ListFile {
    pub fn contents(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.display().to_string());
            text.push('\n');
        }
        text
    }
}

/// Everything needed to run one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPlan {
    pub command: CommandLine,
    pub list_files: Vec<ListFile>,
    /// Output key to destination path.
    pub outputs: IndexMap<String, PathBuf>,
    pub launch: Launch,
}
