//! Integration tests for catalog configuration.

use shopify_catalog::config::{ACCESS_TOKEN_ENV, API_VERSION_ENV, SHOP_URL_ENV};
use shopify_catalog::{ApiVersion, CatalogConfig, ConfigError};
use std::collections::HashMap;

fn lookup(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    move |key| map.get(key).map(|v| (*v).to_string())
}

// =============================================================================
// Version Selection Tests
// =============================================================================

#[test]
fn test_known_versions_round_trip_through_display() {
    for version in [
        ApiVersion::V2023_04,
        ApiVersion::V2023_10,
        ApiVersion::V2024_04,
        ApiVersion::V2024_10,
        ApiVersion::V2025_04,
        ApiVersion::V2025_10,
        ApiVersion::Unstable,
    ] {
        assert_eq!(version.to_string().parse::<ApiVersion>(), Ok(version));
    }
}

#[test]
fn test_unlisted_version_is_accepted_as_custom() {
    let version: ApiVersion = "2026-01".parse().unwrap();
    assert_eq!(version, ApiVersion::Custom("2026-01".to_string()));
    assert_eq!(version.admin_base_path(), "/admin/api/2026-01");
}

#[test]
fn test_malformed_versions_are_rejected() {
    for value in ["2023-13", "2023-4", "latest", ""] {
        assert!(
            matches!(
                value.parse::<ApiVersion>(),
                Err(ConfigError::InvalidApiVersion { .. })
            ),
            "{value:?} should be rejected"
        );
    }
}

// =============================================================================
// Environment Loading Tests
// =============================================================================

#[test]
fn test_lookup_with_all_settings() {
    let config = CatalogConfig::from_lookup(lookup(&[
        (SHOP_URL_ENV, "my-store.myshopify.com"),
        (ACCESS_TOKEN_ENV, "shpat_env"),
        (API_VERSION_ENV, "2025-04"),
    ]))
    .unwrap();

    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.shop_url.as_ref(), "https://my-store.myshopify.com");
    assert_eq!(credentials.access_token.as_ref(), "shpat_env");
    assert_eq!(config.api_version(), &ApiVersion::V2025_04);
}

#[test]
fn test_lookup_without_version_uses_default() {
    let config = CatalogConfig::from_lookup(lookup(&[
        (SHOP_URL_ENV, "https://my-store.myshopify.com"),
        (ACCESS_TOKEN_ENV, "shpat_env"),
    ]))
    .unwrap();

    assert_eq!(config.api_version(), &ApiVersion::V2023_04);
}

#[test]
fn test_missing_values_surface_at_credential_resolution() {
    let config = CatalogConfig::from_lookup(lookup(&[(ACCESS_TOKEN_ENV, "shpat_env")])).unwrap();
    assert_eq!(config.credentials(), Err(ConfigError::MissingShopUrl));

    let config = CatalogConfig::from_lookup(lookup(&[(SHOP_URL_ENV, "https://s.example")])).unwrap();
    assert_eq!(config.credentials(), Err(ConfigError::MissingAccessToken));
}

#[test]
fn test_token_never_appears_in_debug_output() {
    let config = CatalogConfig::builder()
        .shop_url("https://my-store.myshopify.com")
        .access_token("shpat_very_secret")
        .build()
        .unwrap();

    let credentials = config.credentials().unwrap();
    assert!(!format!("{credentials:?}").contains("shpat_very_secret"));
}

#[test]
fn test_non_http_shop_url_is_invalid() {
    let config = CatalogConfig::builder()
        .shop_url("ftp://my-store.myshopify.com")
        .access_token("token")
        .build()
        .unwrap();

    assert!(matches!(
        config.credentials(),
        Err(ConfigError::InvalidShopUrl { .. })
    ));
}
