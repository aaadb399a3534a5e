use serde::Serialize;

use crate::parsers::OutputParser;
use crate::parsers::table::{self, CATALOG_LAYOUT};

/// One row of `odo catalog list components`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCatalogEntry {
    pub name: String,
    pub project: String,
    pub tags: Vec<String>,
}

/// Parses the component catalog table:
///
/// ```text
/// NAME      PROJECT     TAGS
/// nodejs    openshift   1.0
/// python    openshift   1.0,2.0
/// ```
pub struct ComponentCatalogParser;

impl ComponentCatalogParser {
    /// Component type names in row order.
    pub fn names(stdout: &str) -> Vec<String> {
        table::names(stdout, CATALOG_LAYOUT)
    }

    /// Tags of the type named `type_name`; empty when the type is not listed.
    pub fn tags_for(stdout: &str, type_name: &str) -> Vec<String> {
        table::list_for(stdout, CATALOG_LAYOUT, type_name)
    }
}

impl OutputParser for ComponentCatalogParser {
    type Output = Vec<ComponentCatalogEntry>;

    fn parse(&self, stdout: &str) -> Self::Output {
        table::rows(stdout, CATALOG_LAYOUT)
            .map(|fields| ComponentCatalogEntry {
                name: fields[0].to_string(),
                project: fields[1].to_string(),
                tags: table::split_list(fields[CATALOG_LAYOUT.list_column]),
            })
            .collect()
    }
}
