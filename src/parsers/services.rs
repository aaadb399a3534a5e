use serde::Serialize;

use crate::parsers::OutputParser;
use crate::parsers::table::{self, PLANS_LAYOUT};

/// One row of `odo catalog list services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceTemplateEntry {
    pub name: String,
    pub plans: Vec<String>,
}

/// Parses the `NAME  PLANS` service table.
pub struct ServiceCatalogParser;

impl ServiceCatalogParser {
    pub fn names(stdout: &str) -> Vec<String> {
        table::names(stdout, PLANS_LAYOUT)
    }

    pub fn plans_for(stdout: &str, template_name: &str) -> Vec<String> {
        table::list_for(stdout, PLANS_LAYOUT, template_name)
    }
}

impl OutputParser for ServiceCatalogParser {
    type Output = Vec<ServiceTemplateEntry>;

    fn parse(&self, stdout: &str) -> Self::Output {
        table::rows(stdout, PLANS_LAYOUT)
            .map(|fields| ServiceTemplateEntry {
                name: fields[0].to_string(),
                plans: table::split_list(fields[PLANS_LAYOUT.list_column]),
            })
            .collect()
    }
}
