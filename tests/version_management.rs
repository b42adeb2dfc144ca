//! Integration tests for API version resolution.

use shopify_rest::clients::ApiRequest;
use shopify_rest::{AccessToken, ApiConfig, ApiVersion, ConfigError, HostUrl, HttpClient, ShopDomain};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_version(version: Option<&str>, host: Option<&str>) -> HttpClient {
    let mut builder = ApiConfig::builder()
        .shop(ShopDomain::new("demo-3").unwrap())
        .access_token(AccessToken::new("shpat_test").unwrap());
    if let Some(version) = version {
        builder = builder.api_version(version);
    }
    if let Some(host) = host {
        builder = builder.api_host(HostUrl::new(host).unwrap());
    }
    HttpClient::new(builder.build().unwrap())
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_known_versions_parse() {
    assert_eq!("2024-10".parse::<ApiVersion>().unwrap(), ApiVersion::V2024_10);
    assert_eq!("2025-10".parse::<ApiVersion>().unwrap(), ApiVersion::V2025_10);
    assert_eq!(" UNSTABLE ".parse::<ApiVersion>().unwrap(), ApiVersion::Unstable);
}

#[test]
fn test_well_formed_future_version_is_custom() {
    let version: ApiVersion = "2026-01".parse().unwrap();
    assert_eq!(version, ApiVersion::Custom("2026-01".to_string()));
    assert!(!version.is_known());
    assert_eq!(version.to_string(), "2026-01");
}

#[test]
fn test_malformed_version_is_rejected_by_parse() {
    assert!(matches!(
        "2025-13".parse::<ApiVersion>(),
        Err(ConfigError::InvalidApiVersion { .. })
    ));
    assert!(matches!(
        "latest".parse::<ApiVersion>(),
        Err(ConfigError::InvalidApiVersion { .. })
    ));
}

#[test]
fn test_display_round_trips_known_versions() {
    for version in [
        ApiVersion::V2024_10,
        ApiVersion::V2025_01,
        ApiVersion::V2025_04,
        ApiVersion::V2025_07,
        ApiVersion::V2025_10,
        ApiVersion::Unstable,
    ] {
        assert_eq!(version.to_string().parse::<ApiVersion>().unwrap(), version);
    }
}

// =============================================================================
// Resolution on the client
// =============================================================================

#[test]
fn test_unset_version_resolves_to_latest() {
    let client = client_with_version(None, None);
    assert_eq!(client.api_version(), &ApiVersion::latest());
    assert_eq!(client.endpoint("orders").unwrap(), "/admin/api/2025-10/orders.json");
}

#[test]
fn test_known_version_is_used_as_is() {
    let client = client_with_version(Some("2025-01"), None);
    assert_eq!(client.api_version(), &ApiVersion::V2025_01);
}

#[test]
fn test_unrecognized_version_is_kept() {
    let client = client_with_version(Some("2019-04"), None);
    assert_eq!(client.api_version(), &ApiVersion::Custom("2019-04".to_string()));

    let client = client_with_version(Some("not-a-version"), None);
    assert_eq!(
        client.endpoint("shop").unwrap(),
        "/admin/api/not-a-version/shop.json"
    );
}

#[tokio::test]
async fn test_unrecognized_version_is_sent_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2019-04/shop.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"shop":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_version(Some("2019-04"), Some(&server.uri()));
    let endpoint = client.endpoint("shop").unwrap();
    let response = client.request(ApiRequest::get(endpoint)).await.unwrap();

    assert_eq!(response.code, 200);
}
