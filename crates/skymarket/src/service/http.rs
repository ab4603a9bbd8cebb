//! HTTP clients for the listing and price-extension services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, instrument};

use super::{
    Listing, ListingService, PriceExtensionLabel, PriceExtensionRegistry, ServiceError,
    ServiceResult,
};

/// Build the shared HTTP client used by every remote service.
pub(crate) fn build_client(timeout: Duration) -> ServiceResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("skymarket/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ServiceError::from)
}

/// Parse a configured base URL.
pub(crate) fn parse_base_url(base_url: &str) -> ServiceResult<Url> {
    let url = Url::parse(base_url).map_err(|e| ServiceError::endpoint(base_url, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ServiceError::endpoint(base_url, "URL cannot be used as a base"));
    }
    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> ServiceResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ServiceError::endpoint(base.as_str(), "URL cannot be used as a base"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// A loopback URL whose port was just released, so nothing listens on it.
#[cfg(test)]
pub(crate) fn closed_local_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{path}")
}

/// Listing lookups over HTTP: `GET {base}/listings/{id}`.
#[derive(Debug, Clone)]
pub struct HttpListingService {
    client: Client,
    base_url: Url,
}

impl HttpListingService {
    /// Create a client for the listing service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The URL a listing is fetched from.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot take path segments.
    pub fn listing_url(&self, id: &str) -> ServiceResult<Url> {
        join_segments(&self.base_url, &["listings", id])
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_listing(&self, id: &str) -> ServiceResult<Option<Listing>> {
        let url = self.listing_url(id)?;
        let response = self.client.get(url.clone()).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(id, "Listing not found");
                Ok(None)
            }
            status if status.is_success() => {
                let listing = response
                    .json::<Listing>()
                    .await
                    .map_err(|e| ServiceError::Decode(e.to_string()))?;
                Ok(Some(listing))
            }
            status => Err(ServiceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

/// Price-extension label registration over HTTP:
/// `POST {base}/price-extensions` with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpPriceExtensionRegistry {
    client: Client,
    base_url: Url,
}

impl HttpPriceExtensionRegistry {
    /// Create a client for the registry at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The URL labels are posted to.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot take path segments.
    pub fn registration_url(&self) -> ServiceResult<Url> {
        join_segments(&self.base_url, &["price-extensions"])
    }
}

#[async_trait]
impl PriceExtensionRegistry for HttpPriceExtensionRegistry {
    #[instrument(skip(self), level = "debug")]
    async fn register_label(&self, label: &str, created_by: &str) -> ServiceResult<()> {
        let url = self.registration_url()?;
        let body = PriceExtensionLabel {
            label: label.to_string(),
            created_by: created_by.to_string(),
        };
        let response = self.client.post(url.clone()).json(&body).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }
        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::rejected(rejection_reason(status, &text)));
        }
        Err(ServiceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// The reason reported for a 4xx answer: the body if it has one, otherwise
/// the status line.
fn rejection_reason(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_listing_url() {
        let service = HttpListingService::new("https://api.example.com/v1", TIMEOUT).unwrap();
        assert_eq!(
            service.listing_url("abc123").unwrap().as_str(),
            "https://api.example.com/v1/listings/abc123"
        );
    }

    #[test]
    fn test_listing_url_trailing_slash_base() {
        let service = HttpListingService::new("https://api.example.com/v1/", TIMEOUT).unwrap();
        assert_eq!(
            service.listing_url("abc123").unwrap().as_str(),
            "https://api.example.com/v1/listings/abc123"
        );
    }

    #[test]
    fn test_listing_url_encodes_id() {
        let service = HttpListingService::new("https://api.example.com", TIMEOUT).unwrap();
        let url = service.listing_url("a b/c").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/listings/a%20b%2Fc");
    }

    #[test]
    fn test_registration_url() {
        let registry = HttpPriceExtensionRegistry::new("http://localhost:8080", TIMEOUT).unwrap();
        assert_eq!(
            registry.registration_url().unwrap().as_str(),
            "http://localhost:8080/price-extensions"
        );
    }

    #[test]
    fn test_relative_base_rejected() {
        let err = HttpListingService::new("api/v1", TIMEOUT).unwrap_err();
        assert!(matches!(err, ServiceError::Endpoint { .. }));
    }

    #[test]
    fn test_non_base_url_rejected() {
        let err = parse_base_url("mailto:ops@example.com").unwrap_err();
        assert!(err.to_string().contains("cannot be used as a base"));
    }

    #[test]
    fn test_rejection_reason() {
        assert_eq!(
            rejection_reason(StatusCode::CONFLICT, "  label exists \n"),
            "label exists"
        );
        assert_eq!(rejection_reason(StatusCode::CONFLICT, ""), "409 Conflict");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let service =
            HttpListingService::new(&closed_local_url(""), Duration::from_millis(500)).unwrap();
        let result = service.fetch_listing("1").await;
        assert!(matches!(result, Err(ServiceError::Http(_))));
    }
}
