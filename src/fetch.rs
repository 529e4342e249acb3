use anyhow::{Context, Result};
use tracing::info;

const USER_AGENT: &str = concat!("ons_components/", env!("CARGO_PKG_VERSION"));

/// Raw result of a single GET.
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch `url` once. Non-200 statuses are returned, not treated as errors.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Page> {
    info!("Fetching {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    info!(status, bytes = body.len(), "Fetched {}", url);
    Ok(Page { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/design-system/components"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/design-system/components", server.uri());
        let page = fetch_page(&client().unwrap(), &url).await.unwrap();
        assert!(page.is_ok());
        assert_eq!(page.body, "<html></html>");
    }

    #[tokio::test]
    async fn non_200_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let page = fetch_page(&client().unwrap(), &server.uri()).await.unwrap();
        assert_eq!(page.status, 503);
        assert!(!page.is_ok());
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = format!("http://{}/", addr);
        let err = fetch_page(&client().unwrap(), &url)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to fetch"));
    }
}
