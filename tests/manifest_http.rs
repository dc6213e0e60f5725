//! Integration tests for the HTTP manifest source.
//!
//! These tests run the real reqwest client against a wiremock server to
//! verify document parsing and error mapping.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use langtrail::core::config::SourcesConfig;
use langtrail::core::types::VersionId;
use langtrail::manifest::{HttpManifestSource, ManifestError, ManifestSource};

fn sources_for(server: &MockServer) -> SourcesConfig {
    SourcesConfig {
        manifest_url: format!("{}/version_manifest.json", server.uri()),
        detail_url_template: format!("{}/version/{{}}.json", server.uri()),
        resources_url: format!("{}/resources", server.uri()),
    }
}

#[tokio::test]
async fn fetches_and_parses_the_manifest_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version_manifest.json"))
        .and(header("user-agent", "langtrail-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "versions": [
                {"id": "1.1", "omniId": "1.1", "type": "release",
                 "url": "https://example.invalid/1.1.json"},
                {"id": "b1.0", "type": "old_beta",
                 "url": "https://example.invalid/b1.0.json"}
            ]
        })))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let manifest = source.manifest().await.unwrap();

    assert_eq!(manifest.versions.len(), 2);
    assert_eq!(manifest.versions[0].version_id(), "1.1");
    assert_eq!(manifest.versions[1].version_id(), "b1.0");
    assert!(!manifest.versions[1].has_asset_era());
}

#[tokio::test]
async fn fetches_version_detail_by_template() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version/1.1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "previous": ["1.0"],
            "downloads": {"client": {"url": "https://example.invalid/client.jar"}}
        })))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let detail = source
        .version_detail(&VersionId::new("1.1").unwrap())
        .await
        .unwrap();

    assert_eq!(detail.previous, vec!["1.0"]);
    assert!(detail.client_download().is_some());
}

#[tokio::test]
async fn missing_document_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let err = source
        .version_detail(&VersionId::new("nope").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::NotFound(_)));
}

#[tokio::test]
async fn server_error_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let err = source.manifest().await.unwrap_err();
    assert!(matches!(err, ManifestError::ServiceError { status: 500, .. }));
}

#[tokio::test]
async fn html_body_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/package.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let err = source
        .version_package(&format!("{}/package.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Malformed { .. }));
}

#[tokio::test]
async fn asset_objects_unwraps_the_object_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": {
                "pack.mcmeta": {"hash": "aabbcc", "size": 120},
                "minecraft/lang/de_de.json": {"hash": "ddeeff", "size": 9000}
            }
        })))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let objects = source
        .asset_objects(&format!("{}/index.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(objects.len(), 2);
    assert_eq!(objects["pack.mcmeta"].hash, "aabbcc");
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/aa/aabbcc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"raw bytes".to_vec()))
        .mount(&server)
        .await;

    let source = HttpManifestSource::new(sources_for(&server));
    let url = source.resource_url("aabbcc");
    assert_eq!(url, format!("{}/resources/aa/aabbcc", server.uri()));

    let bytes = source.download(&url).await.unwrap();
    assert_eq!(bytes, b"raw bytes");
}
