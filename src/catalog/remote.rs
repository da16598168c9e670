//! The Shopify-backed [`CatalogSource`].
//!
//! [`RemoteCatalogClient`] turns each source operation into exactly one Admin
//! REST request. Credentials are resolved from the config on every call, so a
//! missing shop URL or token fails before anything is sent.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::clients::{HttpClient, HttpRequest, HttpResponse, InvalidHttpRequestError};
use crate::config::CatalogConfig;

use super::error::CatalogError;
use super::inventory::{InventoryLevelRecord, InventoryLevels};
use super::model::RawProduct;
use super::source::{CatalogSource, ProductPage};

const LIST_PRODUCTS_FAILED: &str = "Failed to fetch products from Shopify";
const GET_PRODUCT_FAILED: &str = "Failed to fetch product details from Shopify";
const INVENTORY_FAILED: &str = "Failed to fetch inventory levels from Shopify";
const HANDLE_LOOKUP_FAILED: &str = "Failed to look up product by handle in Shopify";

/// Reads products and inventory from the Shopify Admin REST API.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_catalog::{CatalogConfig, CatalogSource, RemoteCatalogClient};
///
/// # async fn example() -> Result<(), shopify_catalog::CatalogError> {
/// let config = CatalogConfig::from_env()?;
/// let client = RemoteCatalogClient::new(config)?;
///
/// let page = client.list_products(None).await?;
/// println!("{} products on the first page", page.products.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RemoteCatalogClient {
    config: CatalogConfig,
    transport: reqwest::Client,
}

// Verify RemoteCatalogClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RemoteCatalogClient>();
};

#[derive(Deserialize)]
struct HandleMatch {
    id: u64,
}

impl RemoteCatalogClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let transport = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(CatalogError::Transport)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client sharing an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_transport(config: CatalogConfig, transport: reqwest::Client) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration this client reads.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn http_client(&self) -> Result<HttpClient, CatalogError> {
        let credentials = self.config.credentials()?;
        Ok(HttpClient::new(
            self.config.api_version().admin_base_path(),
            &credentials,
            &self.config,
            self.transport.clone(),
        ))
    }
}

async fn send(
    client: &HttpClient,
    request: Result<HttpRequest, InvalidHttpRequestError>,
    failure: &'static str,
) -> Result<HttpResponse, CatalogError> {
    let request = request.map_err(|e| CatalogError::from_http(e.into(), failure))?;
    client
        .request(request)
        .await
        .map_err(|e| CatalogError::from_http(e, failure))
}

/// Removes `key` from a response body, failing if it is absent.
fn take_key(response: &mut HttpResponse, key: &str) -> Result<serde_json::Value, CatalogError> {
    response
        .body
        .get_mut(key)
        .map(serde_json::Value::take)
        .ok_or_else(|| CatalogError::malformed(key, format!("missing key '{key}' in response body")))
}

fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    key: &str,
) -> Result<T, CatalogError> {
    serde_json::from_value(value).map_err(|e| CatalogError::malformed(key, e))
}

impl CatalogSource for RemoteCatalogClient {
    async fn list_products(&self, cursor_url: Option<&str>) -> Result<ProductPage, CatalogError> {
        let client = self.http_client()?;
        let request = match cursor_url {
            None => HttpRequest::builder("products.json").build(),
            Some(url) => HttpRequest::follow(url),
        };

        let mut response = send(&client, request, LIST_PRODUCTS_FAILED).await?;
        let next_page_url = response.next_page_url().map(String::from);
        let products: Vec<RawProduct> = decode(take_key(&mut response, "products")?, "products")?;

        Ok(ProductPage {
            products,
            next_page_url,
        })
    }

    async fn get_product(&self, id: u64) -> Result<RawProduct, CatalogError> {
        let client = self.http_client()?;
        let request = HttpRequest::builder(format!("products/{id}.json")).build();

        let mut response = send(&client, request, GET_PRODUCT_FAILED).await?;
        let product = take_key(&mut response, "product")?;
        if !product.is_object() {
            return Err(CatalogError::malformed(
                format!("product {id}"),
                "expected an object",
            ));
        }
        Ok(RawProduct::new(product))
    }

    async fn inventory_levels(
        &self,
        item_ids: &BTreeSet<u64>,
    ) -> Result<InventoryLevels, CatalogError> {
        let client = self.http_client()?;
        let ids = item_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let request = HttpRequest::builder("inventory_levels.json")
            .query_param("inventory_item_ids", ids)
            .build();

        let mut response = send(&client, request, INVENTORY_FAILED).await?;
        let records: Vec<InventoryLevelRecord> = decode(
            take_key(&mut response, "inventory_levels")?,
            "inventory_levels",
        )?;
        Ok(InventoryLevels::from_records(records))
    }

    async fn find_product_id_by_handle(&self, handle: &str) -> Result<Option<u64>, CatalogError> {
        let client = self.http_client()?;
        let request = HttpRequest::builder("products.json")
            .query_param("handle", handle)
            .query_param("fields", "id")
            .build();

        let mut response = send(&client, request, HANDLE_LOOKUP_FAILED).await?;
        let matches: Vec<HandleMatch> = decode(take_key(&mut response, "products")?, "products")?;
        Ok(matches.first().map(|m| m.id))
    }

    fn check_ready(&self) -> Result<(), CatalogError> {
        self.config.credentials()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_take_key_moves_value_out() {
        let mut response = HttpResponse::new(200, HashMap::new(), json!({"product": {"id": 1}}));
        let value = take_key(&mut response, "product").unwrap();
        assert_eq!(value, json!({"id": 1}));
    }

    #[test]
    fn test_take_key_reports_missing_key() {
        let mut response = HttpResponse::new(200, HashMap::new(), json!({}));
        let error = take_key(&mut response, "inventory_levels").unwrap_err();
        assert!(matches!(
            error,
            CatalogError::MalformedUpstreamData { ref context, .. } if context == "inventory_levels"
        ));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_sending() {
        let config = CatalogConfig::builder().build().unwrap();
        let client = RemoteCatalogClient::with_transport(config, reqwest::Client::new());

        let error = client.get_product(1).await.unwrap_err();
        assert!(matches!(error, CatalogError::Configuration(_)));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RemoteCatalogClient>();
    }
}
