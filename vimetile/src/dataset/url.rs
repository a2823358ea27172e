//! Dataset connection strings.
//!
//! # Format
//!
//! ```text
//! [vime://]{scheme}://{host}/project/{project}/stack/{stack}[/neuroglancer]
//!     /type/{type}/{iteration}/{file_iteration}[/...]
//! ```
//!
//! The iteration pair may also be spelled out as
//! `/iteration/{iteration}/file_iteration/{file_iteration}`, matching the
//! tile path grammar. Anything after the file iteration is ignored.

use std::str::Split;

use crate::stack::StackIdentity;

use super::error::DatasetError;

/// A parsed dataset connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetUrl {
    pub identity: StackIdentity,
}

impl DatasetUrl {
    /// Parses a connection string.
    pub fn parse(input: &str) -> Result<Self, DatasetError> {
        parse_identity(input)
            .map(|identity| Self { identity })
            .map_err(|reason| DatasetError::InvalidUrl {
                url: input.to_string(),
                reason,
            })
    }

    pub fn base_url(&self) -> &str {
        &self.identity.base_url
    }
}

fn parse_identity(input: &str) -> Result<StackIdentity, String> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix("vime://").unwrap_or(trimmed);
    let (scheme, rest) = trimmed
        .split_once("://")
        .filter(|(scheme, _)| !scheme.is_empty())
        .ok_or_else(|| "missing scheme".to_string())?;

    let mut inner = rest.split('/');
    let host = inner
        .next()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| "missing host".to_string())?;
    let mut segments = Segments { inner };

    segments.expect("project")?;
    let project_name = segments.value("project name")?;
    segments.expect("stack")?;
    let stack_name = segments.value("stack name")?;

    let mut keyword = segments.value("`type`")?;
    if keyword == "neuroglancer" {
        keyword = segments.value("`type`")?;
    }
    if keyword != "type" {
        return Err(format!("expected `type`, found `{}`", keyword));
    }
    let stack_type = segments.value("stack type")?;

    let iteration = segments.number("iteration", "iteration")?;
    let file_iteration = segments.number("file_iteration", "file iteration")?;

    Ok(StackIdentity {
        base_url: format!("{}://{}", scheme, host),
        project_name,
        stack_name,
        stack_type,
        iteration,
        file_iteration,
    })
}

/// Non-empty path segments of a connection string.
struct Segments<'a> {
    inner: Split<'a, char>,
}

impl<'a> Segments<'a> {
    fn next(&mut self) -> Option<&'a str> {
        self.inner.find(|s| !s.is_empty())
    }

    fn value(&mut self, what: &str) -> Result<String, String> {
        self.next()
            .map(str::to_owned)
            .ok_or_else(|| format!("missing {}", what))
    }

    fn expect(&mut self, keyword: &str) -> Result<(), String> {
        match self.next() {
            Some(s) if s == keyword => Ok(()),
            Some(s) => Err(format!("expected `{}`, found `{}`", keyword, s)),
            None => Err(format!("missing `{}`", keyword)),
        }
    }

    /// Reads a number, optionally preceded by its keyword.
    fn number(&mut self, keyword: &str, what: &str) -> Result<u64, String> {
        let mut raw = self.value(what)?;
        if raw == keyword {
            raw = self.value(what)?;
        }
        raw.parse()
            .map_err(|_| format!("{} must be a non-negative integer, found `{}`", what, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> StackIdentity {
        DatasetUrl::parse(input).unwrap().identity
    }

    fn reason(input: &str) -> String {
        match DatasetUrl::parse(input) {
            Err(DatasetError::InvalidUrl { reason, .. }) => reason,
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_short_form() {
        let identity = parse_ok("https://vime.example.org/project/p1/stack/s1/type/raw/3/0");
        assert_eq!(identity.base_url, "https://vime.example.org");
        assert_eq!(identity.project_name, "p1");
        assert_eq!(identity.stack_name, "s1");
        assert_eq!(identity.stack_type, "raw");
        assert_eq!(identity.iteration, 3);
        assert_eq!(identity.file_iteration, 0);
    }

    #[test]
    fn test_neuroglancer_segment() {
        let identity = parse_ok("http://host:8080/project/p1/stack/s1/neuroglancer/type/raw/3/0");
        assert_eq!(identity.base_url, "http://host:8080");
        assert_eq!(identity.stack_type, "raw");
    }

    #[test]
    fn test_long_form_and_trailing_segments() {
        let identity = parse_ok(
            "http://host/project/p1/stack/s1/neuroglancer/type/raw/iteration/7/file_iteration/2/256/256/0/0/0/0.jpg",
        );
        assert_eq!(identity.iteration, 7);
        assert_eq!(identity.file_iteration, 2);
    }

    #[test]
    fn test_vime_prefix() {
        let identity = parse_ok("vime://http://host/project/p1/stack/s1/type/raw/3/0");
        assert_eq!(identity.base_url, "http://host");
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(reason("host/project/p1/stack/s1/type/raw/3/0"), "missing scheme");
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(reason("http:///project/p1/stack/s1/type/raw/3/0"), "missing host");
    }

    #[test]
    fn test_wrong_keyword() {
        assert_eq!(
            reason("http://host/projects/p1/stack/s1/type/raw/3/0"),
            "expected `project`, found `projects`"
        );
    }

    #[test]
    fn test_missing_file_iteration() {
        assert_eq!(
            reason("http://host/project/p1/stack/s1/type/raw/3"),
            "missing file iteration"
        );
    }

    #[test]
    fn test_non_numeric_iteration() {
        assert_eq!(
            reason("http://host/project/p1/stack/s1/type/raw/three/0"),
            "iteration must be a non-negative integer, found `three`"
        );
    }
}
