pub mod catalog;
pub mod services;
pub mod table;
pub mod version;

/// Trait for turning captured odo stdout into a typed value.
/// Each subcommand has its own output shape.
///
/// Parsing is infallible: unexpected text yields a fallback value
/// (sentinel version, empty list) instead of an error.
pub trait OutputParser: Send + Sync {
    type Output;

    fn parse(&self, stdout: &str) -> Self::Output;
}
