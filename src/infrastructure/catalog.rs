use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::order::{CatalogEntry, DrinkSize};
use crate::domain::ports::DrinkCatalog;

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::CatalogUnavailable(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CatalogSetupError {
    #[error("invalid drink catalog URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Body of `GET {base}/menu/{name}`.
#[derive(Debug, Deserialize)]
struct CatalogDrink {
    name: String,
    size: DrinkSize,
    #[serde(deserialize_with = "exact_price")]
    price: BigDecimal,
}

// Prices arrive as JSON numbers. Going through their text keeps binary
// floating point out of the totals.
fn exact_price<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s,
        other => return Err(D::Error::custom(format!("price must be a number, got {other}"))),
    };
    let price = BigDecimal::from_str(&text).map_err(D::Error::custom)?;
    if price < BigDecimal::from(0) {
        return Err(D::Error::custom(format!("negative price {price}")));
    }
    Ok(price)
}

impl From<CatalogDrink> for CatalogEntry {
    fn from(drink: CatalogDrink) -> Self {
        CatalogEntry {
            name: drink.name,
            size: drink.size,
            unit_price: drink.price,
        }
    }
}

/// Client for the drink catalog service.
pub struct HttpDrinkCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDrinkCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogSetupError> {
        let invalid = |reason: String| CatalogSetupError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: url,
        })
    }

    fn drink_url(&self, name: &str) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::CatalogUnavailable("catalog URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push("menu")
            .push(name);
        Ok(url)
    }

    /// True when the catalog lists `name` in exactly `size`.
    pub async fn is_available(&self, name: &str, size: DrinkSize) -> Result<bool, DomainError> {
        Ok(self
            .find_by_name(name)
            .await?
            .is_some_and(|entry| entry.size == size))
    }
}

#[async_trait]
impl DrinkCatalog for HttpDrinkCatalog {
    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogEntry>, DomainError> {
        let url = self.drink_url(name)?;
        log::debug!("catalog lookup {}", url);

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let drink: CatalogDrink = response.json().await?;
                Ok(Some(drink.into()))
            }
            status => Err(DomainError::CatalogUnavailable(format!(
                "catalog answered {} for '{}'",
                status, name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde_json::json;

    use super::*;

    async fn menu_item(name: web::Path<String>) -> HttpResponse {
        match name.as_str() {
            "Latte" => HttpResponse::Ok().json(json!({
                "id": 1, "name": "Latte", "size": "medium", "price": 3.50
            })),
            "Flat White" => HttpResponse::Ok().json(json!({
                "id": 2, "name": "Flat White", "size": "small", "price": "3.10"
            })),
            "Broken" => HttpResponse::InternalServerError().json(json!({
                "detail": "database down"
            })),
            "Garbled" => HttpResponse::Ok().body("definitely not json"),
            "Free" => HttpResponse::Ok().json(json!({
                "id": 3, "name": "Free", "size": "small", "price": -1
            })),
            "Slow" => {
                actix_web::rt::time::sleep(Duration::from_millis(500)).await;
                HttpResponse::Ok().json(json!({
                    "id": 4, "name": "Slow", "size": "large", "price": 1
                }))
            }
            other => HttpResponse::NotFound().json(json!({
                "detail": format!("drink '{other}' not found")
            })),
        }
    }

    fn spawn_catalog() -> String {
        let server = HttpServer::new(|| App::new().route("/menu/{name}", web::get().to(menu_item)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind failed");
        let port = server.addrs()[0].port();
        actix_web::rt::spawn(server.run());
        format!("http://127.0.0.1:{port}")
    }

    fn client(base: &str) -> HttpDrinkCatalog {
        HttpDrinkCatalog::new(base, Duration::from_millis(200)).expect("valid catalog URL")
    }

    #[actix_web::test]
    async fn found_drink_is_returned_with_exact_price() {
        let catalog = client(&spawn_catalog());

        let entry = catalog.find_by_name("Latte").await.unwrap().expect("known drink");

        assert_eq!(entry.name, "Latte");
        assert_eq!(entry.size, DrinkSize::Medium);
        assert_eq!(entry.unit_price, BigDecimal::from_str("3.5").unwrap());
    }

    #[actix_web::test]
    async fn names_are_path_escaped_and_string_prices_accepted() {
        let base = format!("{}/", spawn_catalog());
        let catalog = client(&base);

        let entry = catalog.find_by_name("Flat White").await.unwrap().expect("known drink");

        assert_eq!(entry.unit_price, BigDecimal::from_str("3.10").unwrap());
    }

    #[actix_web::test]
    async fn not_found_is_an_answer_not_an_error() {
        let catalog = client(&spawn_catalog());
        assert_eq!(catalog.find_by_name("Ghost").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn server_error_is_a_dependency_failure() {
        let catalog = client(&spawn_catalog());
        let err = catalog.find_by_name("Broken").await.unwrap_err();
        assert!(matches!(err, DomainError::CatalogUnavailable(_)));
    }

    #[actix_web::test]
    async fn malformed_body_is_a_dependency_failure() {
        let catalog = client(&spawn_catalog());
        for name in ["Garbled", "Free"] {
            let err = catalog.find_by_name(name).await.unwrap_err();
            assert!(matches!(err, DomainError::CatalogUnavailable(_)), "{name}");
        }
    }

    #[actix_web::test]
    async fn timeout_is_a_dependency_failure() {
        let catalog = client(&spawn_catalog());
        let err = catalog.find_by_name("Slow").await.unwrap_err();
        assert!(matches!(err, DomainError::CatalogUnavailable(_)));
    }

    #[actix_web::test]
    async fn unreachable_catalog_is_a_dependency_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let catalog = client(&format!("http://127.0.0.1:{port}"));
        let err = catalog.find_by_name("Latte").await.unwrap_err();
        assert!(matches!(err, DomainError::CatalogUnavailable(_)));
    }

    #[actix_web::test]
    async fn availability_requires_matching_size() {
        let catalog = client(&spawn_catalog());
        assert!(catalog.is_available("Latte", DrinkSize::Medium).await.unwrap());
        assert!(!catalog.is_available("Latte", DrinkSize::Large).await.unwrap());
        assert!(!catalog.is_available("Ghost", DrinkSize::Small).await.unwrap());
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpDrinkCatalog::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpDrinkCatalog::new("mailto:menu@example.com", Duration::from_secs(1)).is_err());
    }
}
