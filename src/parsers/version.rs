use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsers::OutputParser;

/// Returned whenever no version can be read from the banner.
pub const SENTINEL_VERSION: &str = "0.0.0";

static VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("invalid version regex"));

/// Extracts `MAJOR.MINOR.PATCH` from a version banner such as
/// `odo v0.0.13 (65b5bed8)`.
///
/// When built with a program name, the banner must start with that name as
/// a whole token; `odounexpected v0.0.13` is rejected even though it carries
/// a triplet.
#[derive(Debug, Clone)]
pub struct VersionParser {
    program: Option<String>,
}

impl VersionParser {
    /// Require the banner to start with `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// Accept the first triplet anywhere in the text.
    pub fn any() -> Self {
        Self { program: None }
    }

    /// The part of stdout after the program token, if the banner has one.
    fn after_program<'a>(&self, stdout: &'a str) -> Option<&'a str> {
        let Some(program) = self.program.as_deref() else {
            return Some(stdout);
        };
        let rest = stdout.trim_start().strip_prefix(program)?;
        rest.starts_with(char::is_whitespace).then_some(rest)
    }
}

impl OutputParser for VersionParser {
    type Output = String;

    fn parse(&self, stdout: &str) -> String {
        self.after_program(stdout)
            .and_then(|rest| VERSION_REGEX.find(rest))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| SENTINEL_VERSION.to_string())
    }
}
