//! .env file parsing.
//!
//! Variables from the configured env file are forwarded to the delegate.
//! Values are passed through untouched; nothing here inspects them.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Exported: `export KEY=value`
/// - Comments: `# This is a comment`
///
/// # Example
///
/// ```
/// use venvoy::config::EnvFileParser;
///
/// let vars = EnvFileParser::parse("API_BASE=https://api.example.com\nDEBUG=\"1\"\n");
/// assert_eq!(vars.get("API_BASE").map(String::as_str), Some("https://api.example.com"));
/// assert_eq!(vars.get("DEBUG").map(String::as_str), Some("1"));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content into a map of variables.
    pub fn parse(content: &str) -> BTreeMap<String, String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), Self::unquote(value.trim())))
    }

    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file.
    pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read env file {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Load an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<BTreeMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("Env file {} not present, skipping", path.display());
            Ok(BTreeMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn skips_comments_and_blank_lines() {
        let vars = EnvFileParser::parse("# comment\n\nKEY=value\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn handles_quotes_and_export_prefix() {
        let vars = EnvFileParser::parse("export A=\"x y\"\nB='z'\nC=\"\n");
        assert_eq!(vars.get("A"), Some(&"x y".to_string()));
        assert_eq!(vars.get("B"), Some(&"z".to_string()));
        assert_eq!(vars.get("C"), Some(&"\"".to_string()));
    }

    #[test]
    fn keeps_equals_inside_value() {
        let vars = EnvFileParser::parse("URL=https://x.test/?a=b\n");
        assert_eq!(vars.get("URL"), Some(&"https://x.test/?a=b".to_string()));
    }

    #[test]
    fn ignores_lines_without_key() {
        let vars = EnvFileParser::parse("=value\nnot a pair\n");
        assert!(vars.is_empty());
    }

    #[test]
    fn load_optional_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let vars = EnvFileParser::load_optional(&temp.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "A=1\n").unwrap();
        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("A"), Some(&"1".to_string()));
    }
}
