//! Domain classification for command and handler class names.
//!
//! A domain is the business capability segment of a namespace, e.g. `Tax` in
//! `PrestaShop\PrestaShop\Core\Domain\Tax\Command\AddTaxCommand`.

use regex::Regex;

use crate::error::{DocToolsError, Result};

/// Pattern for classes of the production core namespace.
pub const CORE_DOMAIN_PATTERN: &str = r"PrestaShop\\PrestaShop\\Core\\Domain\\([a-zA-Z]+)\\";

/// Pattern for the test fixture namespace.
pub const TEST_DOMAIN_PATTERN: &str = r"Tests\\Resources\\Domain\\([a-zA-Z]+)\\";

/// Maps a fully-qualified class name to its domain label.
pub trait DomainParser {
    /// Returns the domain of `class_name`, or an empty string when none matches.
    fn parse_domain(&self, class_name: &str) -> String;
}

/// Domain parser driven by a regular expression with one capture group.
#[derive(Debug, Clone)]
pub struct RegexDomainParser {
    pattern: Regex,
}

impl RegexDomainParser {
    /// Builds a parser from a pattern whose first capture group is the domain.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| DocToolsError::config(format!("Invalid domain pattern: {e}")))?;

        if pattern.captures_len() < 2 {
            return Err(DocToolsError::config(format!(
                "Domain pattern '{}' must contain a capture group for the domain name",
                pattern.as_str()
            )));
        }

        Ok(Self { pattern })
    }

    /// Parser for the production core namespace.
    pub fn core() -> Self {
        Self {
            pattern: Regex::new(CORE_DOMAIN_PATTERN).expect("core domain pattern is valid"),
        }
    }

    /// Parser for the test fixture namespace.
    pub fn test_fixtures() -> Self {
        Self {
            pattern: Regex::new(TEST_DOMAIN_PATTERN).expect("test domain pattern is valid"),
        }
    }

    /// Resolves a configured pattern name (`core`, `test`) or a custom regex.
    pub fn from_setting(setting: &str) -> Result<Self> {
        match setting {
            "core" => Ok(Self::core()),
            "test" => Ok(Self::test_fixtures()),
            custom => Self::new(custom),
        }
    }
}

impl DomainParser for RegexDomainParser {
    fn parse_domain(&self, class_name: &str) -> String {
        self.pattern
            .captures(class_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}
