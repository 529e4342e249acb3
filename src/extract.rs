use std::sync::OnceLock;

use scraper::{Html, Selector};
use tracing::{debug, warn};

pub const NAV_LINK_SELECTOR: &str =
    "ul.ons-section-nav__list li.ons-section-nav__item a.ons-section-nav__link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub link: String,
}

fn nav_link_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(NAV_LINK_SELECTOR).unwrap())
}

/// Pull every section-nav anchor out of `html`, in document order.
pub fn extract_components(html: &str) -> Vec<ComponentRecord> {
    let document = Html::parse_document(html);

    let records: Vec<ComponentRecord> = document
        .select(nav_link_selector())
        .filter_map(|el| {
            let name = el.text().collect::<String>().trim().to_string();
            match el.value().attr("href") {
                Some(href) => Some(ComponentRecord {
                    name,
                    link: href.to_string(),
                }),
                None => {
                    warn!("Skipping nav link without href: {:?}", name);
                    None
                }
            }
        })
        .collect();

    debug!("Extracted {} components", records.len());
    records
}
