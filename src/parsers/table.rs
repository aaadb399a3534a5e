//! Row splitting shared by the catalog and service listings.
//!
//! Both listings are whitespace-aligned tables with a header line. The last
//! column may be a comma-separated sub-list.

/// Shape of one fixed table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Minimum number of whitespace-separated fields a data row must have.
    pub columns: usize,
    /// Index of the comma-separated list column.
    pub list_column: usize,
}

/// `NAME  PROJECT  TAGS`
pub const CATALOG_LAYOUT: TableLayout = TableLayout {
    columns: 3,
    list_column: 2,
};

/// `NAME  PLANS`
pub const PLANS_LAYOUT: TableLayout = TableLayout {
    columns: 2,
    list_column: 1,
};

/// Data rows of `stdout`, each split on whitespace runs.
///
/// The header (first non-blank line) and blank lines are skipped, as are rows
/// with fewer fields than the layout requires.
pub fn rows(stdout: &str, layout: TableLayout) -> impl Iterator<Item = Vec<&str>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(move |fields| fields.len() >= layout.columns)
}

/// First-column values in row order.
pub fn names(stdout: &str, layout: TableLayout) -> Vec<String> {
    rows(stdout, layout)
        .map(|fields| fields[0].to_string())
        .collect()
}

/// The list column of the first row named `name`, or empty when absent.
pub fn list_for(stdout: &str, layout: TableLayout, name: &str) -> Vec<String> {
    rows(stdout, layout)
        .find(|fields| fields[0] == name)
        .map(|fields| split_list(fields[layout.list_column]))
        .unwrap_or_default()
}

/// Split a `a,b,c` cell. Empty pieces (trailing commas) are dropped.
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
