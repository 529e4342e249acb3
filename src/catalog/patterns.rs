use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{load_json, Catalog, CatalogEntry, CatalogError, CatalogKind, Variant};

#[derive(Debug, Deserialize)]
pub struct PatternsFile {
    pub organisations: Vec<OrganisationPatterns>,
}

#[derive(Debug, Deserialize)]
pub struct OrganisationPatterns {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub categories: Vec<PatternCategory>,
}

#[derive(Debug, Deserialize)]
pub struct PatternCategory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub links: Vec<PatternLink>,
}

#[derive(Debug, Deserialize)]
pub struct PatternLink {
    pub name: String,
    pub href: String,
}

pub fn load_patterns(path: &Path) -> Result<Vec<OrganisationPatterns>> {
    let file: PatternsFile = load_json(path)?;
    Ok(file.organisations)
}

fn resolve(org: &OrganisationPatterns, href: &str) -> Result<String, CatalogError> {
    Url::parse(&org.url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .map_err(|source| CatalogError::UnresolvedHref {
            organisation: org.name.clone(),
            base: org.url.clone(),
            href: href.to_string(),
            source,
        })
}

/// Group patterns by name. The variant count is how many times the lower-cased
/// name occurs across every organisation; the title is the first category seen.
pub fn group_patterns(data: &[OrganisationPatterns]) -> Result<Catalog> {
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for link in data
        .iter()
        .flat_map(|o| &o.categories)
        .flat_map(|c| &c.links)
    {
        *occurrences.entry(link.name.to_lowercase()).or_insert(0) += 1;
    }

    let mut catalog = Catalog::new(CatalogKind::Patterns);
    for org in data {
        catalog
            .org_variant_count
            .entry(org.name.clone())
            .or_insert(0);

        for category in &org.categories {
            for link in &category.links {
                let url = resolve(org, &link.href)?;
                let entry = catalog
                    .entries
                    .entry(link.name.clone())
                    .or_insert_with(|| CatalogEntry {
                        name: link.name.clone(),
                        title: Some(category.title.clone()),
                        variant_count: 0,
                        items: Vec::new(),
                    });
                entry.items.push(Variant {
                    organisation: org.name.clone(),
                    url,
                });
                entry.variant_count = occurrences
                    .get(&link.name.to_lowercase())
                    .copied()
                    .unwrap_or_default();

                if let Some(n) = catalog.org_variant_count.get_mut(&org.name) {
                    *n += 1;
                }
            }
        }
    }

    debug!(
        organisations = ?catalog.org_variant_count,
        "Grouped {} patterns from {} organisations",
        catalog.entries.len(),
        data.len()
    );
    Ok(catalog)
}
