use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use super::{load_json, Catalog, CatalogEntry, CatalogKind, Variant};

#[derive(Debug, Deserialize)]
pub struct OrganisationComponents {
    pub organisation: String,
    pub components: Vec<ComponentLink>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentLink {
    pub name: String,
    pub url: String,
}

pub fn load_components(path: &Path) -> Result<Vec<OrganisationComponents>> {
    load_json(path)
}

/// One entry per component name; every occurrence is a variant.
pub fn group_components(data: &[OrganisationComponents]) -> Catalog {
    let mut catalog = Catalog::new(CatalogKind::Components);

    for org in data {
        let org_count = catalog
            .org_variant_count
            .entry(org.organisation.clone())
            .or_insert(0);
        *org_count += org.components.len();

        for c in &org.components {
            let entry = catalog
                .entries
                .entry(c.name.clone())
                .or_insert_with(|| CatalogEntry {
                    name: c.name.clone(),
                    title: None,
                    variant_count: 0,
                    items: Vec::new(),
                });
            entry.items.push(Variant {
                organisation: org.organisation.clone(),
                url: c.url.clone(),
            });
            entry.variant_count += 1;
        }
    }

    debug!(
        organisations = ?catalog.org_variant_count,
        "Grouped {} components from {} organisations",
        catalog.entries.len(),
        data.len()
    );
    catalog
}
