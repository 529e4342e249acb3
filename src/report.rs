use std::io::Write;

use anyhow::Result;

use crate::extract::{extract_components, ComponentRecord};
use crate::fetch::{fetch_page, Page};

pub const FAILURE_MESSAGE: &str = "Failed to retrieve the webpage.";

pub fn format_record(record: &ComponentRecord) -> String {
    format!("Component name: {}, Link: {}", record.name, record.link)
}

/// Write the component lines for a 200 page, or the failure line for anything else.
pub fn report<W: Write>(out: &mut W, page: &Page) -> Result<()> {
    if !page.is_ok() {
        writeln!(out, "{}", FAILURE_MESSAGE)?;
        return Ok(());
    }

    for record in extract_components(&page.body) {
        writeln!(out, "{}", format_record(&record))?;
    }
    Ok(())
}

/// Fetch `url` and report its nav components to `out`.
pub async fn scrape<W: Write>(client: &reqwest::Client, url: &str, out: &mut W) -> Result<()> {
    let page = fetch_page(client, url).await?;
    report(out, &page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <nav class="ons-section-nav">
    <ul class="ons-section-nav__list">
      <li class="ons-section-nav__item">
        <a class="ons-section-nav__link" href="/design-system/components/accordion">
          Accordion
        </a>
      </li>
      <li class="ons-section-nav__item ons-section-nav__item--active">
        <a class="ons-section-nav__link" href="/design-system/components/breadcrumbs">Breadcrumbs</a>
      </li>
    </ul>
  </nav>
</body></html>"#;

    async fn run(status: u16, body: &str) -> String {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        scrape(&client().unwrap(), &server.uri(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn prints_one_line_per_component() {
        let out = run(200, PAGE).await;
        assert_eq!(
            out,
            "Component name: Accordion, Link: /design-system/components/accordion\n\
             Component name: Breadcrumbs, Link: /design-system/components/breadcrumbs\n"
        );
    }

    #[tokio::test]
    async fn non_200_prints_only_failure() {
        for status in [404, 500] {
            // Body would match if it were parsed.
            let out = run(status, PAGE).await;
            assert_eq!(out, "Failed to retrieve the webpage.\n");
        }
    }

    #[tokio::test]
    async fn no_matches_prints_nothing() {
        assert_eq!(run(200, "<html><body><p>nothing</p></body></html>").await, "");
    }

    #[test]
    fn format_is_literal() {
        let record = ComponentRecord {
            name: "Foo".into(),
            link: "/x".into(),
        };
        assert_eq!(format_record(&record), "Component name: Foo, Link: /x");
    }

    #[test]
    fn report_counts_match() {
        let items: String = (0..5)
            .map(|i| {
                format!(
                    r#"<li class="ons-section-nav__item"><a class="ons-section-nav__link" href="/c/{i}">C{i}</a></li>"#
                )
            })
            .collect();
        let page = Page {
            status: 200,
            body: format!(r#"<ul class="ons-section-nav__list">{}</ul>"#, items),
        };
        let mut out = Vec::new();
        report(&mut out, &page).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "Component name: C3, Link: /c/3");
    }
}
