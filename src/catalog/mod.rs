pub mod components;
pub mod patterns;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{organisation}: cannot resolve {href:?} against {base:?}")]
    UnresolvedHref {
        organisation: String,
        base: String,
        href: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Components,
    Patterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub organisation: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// Category heading; patterns only.
    pub title: Option<String>,
    pub variant_count: usize,
    pub items: Vec<Variant>,
}

/// Entries grouped by exact name, plus how many variants each organisation contributed.
#[derive(Debug)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub entries: BTreeMap<String, CatalogEntry>,
    pub org_variant_count: BTreeMap<String, usize>,
}

impl Catalog {
    pub fn new(kind: CatalogKind) -> Self {
        Catalog {
            kind,
            entries: BTreeMap::new(),
            org_variant_count: BTreeMap::new(),
        }
    }

    /// Entries whose name or any organisation contains `search`, sorted by name.
    /// Items inside each entry come back sorted by organisation.
    pub fn visible(&self, search: &str) -> Vec<CatalogEntry> {
        let term = search.trim().to_lowercase();
        let mut shown: Vec<CatalogEntry> = self
            .entries
            .values()
            .filter(|e| {
                term.is_empty()
                    || e.name.to_lowercase().contains(&term)
                    || e.items
                        .iter()
                        .any(|i| i.organisation.to_lowercase().contains(&term))
            })
            .cloned()
            .collect();

        shown.sort_by_cached_key(|e| collation_key(&e.name));
        for entry in &mut shown {
            entry
                .items
                .sort_by_cached_key(|i| collation_key(&i.organisation));
        }
        shown
    }

    pub fn render<W: Write>(&self, out: &mut W, search: &str) -> Result<usize> {
        let shown = self.visible(search);
        for entry in &shown {
            match (self.kind, entry.title.as_deref()) {
                (CatalogKind::Patterns, Some(t)) if !t.is_empty() => {
                    writeln!(out, "[{}] {}", t, entry.name)?
                }
                _ => writeln!(out, "{}", entry.name)?,
            }
            match self.kind {
                CatalogKind::Components => {
                    writeln!(out, "  number of variant(s) {}", entry.variant_count)?
                }
                CatalogKind::Patterns => {
                    writeln!(out, "  Number of variant(s): {}", entry.variant_count)?
                }
            }
            for item in &entry.items {
                writeln!(out, "  - {}: {}", item.organisation, item.url)?;
            }
            writeln!(out)?;
        }
        Ok(shown.len())
    }
}

/// Case-insensitive order; on a tie the lower-case spelling comes first.
fn collation_key(s: &str) -> (String, String) {
    let swapped = s
        .chars()
        .map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<String>()
            } else {
                c.to_uppercase().collect::<String>()
            }
        })
        .collect();
    (s.to_lowercase(), swapped)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
