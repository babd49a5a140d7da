use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use storico_core::{ObservationsProvider, StoricoError};
use storico_fred::FredConnector;

fn connector(server: &MockServer) -> FredConnector {
    FredConnector::builder()
        .api_key("test-key")
        .base_url(server.base_url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn http_400_maps_to_invalid_series() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/series/observations");
            then.status(400)
                .json_body(json!({ "error_message": "Bad Request." }));
        })
        .await;

    let err = connector(&server)
        .fetch("NOT_A_SERIES", None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoricoError::invalid_series("storico-fred", "NOT_A_SERIES")
    );
}

#[tokio::test]
async fn auth_and_rate_limit_statuses_map_to_source_unavailable() {
    for status in [401u16, 403, 429, 500, 503] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/series/observations");
                then.status(status);
            })
            .await;

        let err = connector(&server)
            .fetch("SP500", None, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoricoError::SourceUnavailable { .. }),
            "status {status} produced {err:?}"
        );
    }
}

#[tokio::test]
async fn malformed_body_maps_to_source_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/series/observations");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = connector(&server)
        .fetch("SP500", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoricoError::SourceUnavailable { .. }));
}

#[tokio::test]
async fn client_timeout_maps_to_source_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/series/observations");
            then.status(200)
                .json_body(json!({ "observations": [] }))
                .delay(Duration::from_millis(500));
        })
        .await;

    let fred = FredConnector::builder()
        .api_key("test-key")
        .base_url(server.base_url())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = fred.fetch("SP500", None, None).await.unwrap_err();
    match err {
        StoricoError::SourceUnavailable { msg, .. } => {
            assert!(msg.contains("timed out"), "{msg}");
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_maps_to_source_unavailable() {
    // Nothing listens here; the connection itself fails.
    let fred = FredConnector::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = fred.fetch("SP500", None, None).await.unwrap_err();
    assert!(matches!(err, StoricoError::SourceUnavailable { .. }));
}
