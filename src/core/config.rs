//! Run configuration

use serde::{Deserialize, Serialize};

/// Default Markdown extensions
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Options controlling which files are loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Include hidden files and directories
    pub hidden: bool,

    /// Honour .gitignore / .ignore files
    pub respect_ignore: bool,

    /// Extensions treated as Markdown documents
    pub extensions: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            hidden: false,
            respect_ignore: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CheckConfig {
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_ignore(mut self, respect_ignore: bool) -> Self {
        self.respect_ignore = respect_ignore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert!(!config.hidden);
        assert!(config.respect_ignore);
        assert_eq!(config.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn test_builders() {
        let config = CheckConfig::default().with_hidden(true).with_ignore(false);
        assert!(config.hidden);
        assert!(!config.respect_ignore);
    }
}
