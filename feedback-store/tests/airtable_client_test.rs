use feedback_store::airtable::AirtableClient;
use feedback_store::{Fields, RecordStore, StoreError};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> AirtableClient {
    AirtableClient::new("test-key", "appTest")
        .unwrap()
        .with_base_url(server.url())
}

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_find_records_sends_filter_and_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v0/appTest/Tuition")
        .match_header("authorization", "Bearer test-key")
        .match_query(Matcher::UrlEncoded(
            "filterByFormula".into(),
            "{Feedback ID} = 42".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "records": [
                    {"id": "recA", "createdTime": "2025-03-01T10:00:00.000Z",
                     "fields": {"Feedback ID": 42, "Status": "Pending"}},
                    {"id": "recB", "fields": {"Feedback ID": 42}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let records = client_for(&server)
        .find_records("Tuition", "{Feedback ID} = 42")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "recA");
    assert_eq!(records[0].text_field("Status"), Some("Pending"));
    assert_eq!(records[1].id, "recB");
}

#[tokio::test]
async fn test_find_records_encodes_table_name() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            Matcher::Regex(r"^/v0/appTest/Demo(%20| )Feedback$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"records": []}"#)
        .create_async()
        .await;

    let records = client_for(&server)
        .find_records("Demo Feedback", "{Feedback ID} = 1")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_update_record_patches_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/v0/appTest/Demo/rec123")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "fields": {"Teaching Rating": 5, "Status": "Submitted"}
        })))
        .with_status(200)
        .with_body(
            json!({"id": "rec123", "fields": {"Teaching Rating": 5, "Status": "Submitted"}})
                .to_string(),
        )
        .create_async()
        .await;

    let record = client_for(&server)
        .update_record(
            "Demo",
            "rec123",
            fields(json!({"Teaching Rating": 5, "Status": "Submitted"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(record.id, "rec123");
    assert_eq!(record.fields["Teaching Rating"], json!(5));
}

#[tokio::test]
async fn test_create_record_posts_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v0/appTest/Feedback")
        .match_body(Matcher::Json(json!({"fields": {"Tutor ID": "T-7"}})))
        .with_status(200)
        .with_body(json!({"id": "recNew", "fields": {"Tutor ID": "T-7"}}).to_string())
        .create_async()
        .await;

    let record = client_for(&server)
        .create_record("Feedback", fields(json!({"Tutor ID": "T-7"})))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(record.id, "recNew");
}

#[tokio::test]
async fn test_structured_error_keeps_message_and_details() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PATCH", "/v0/appTest/Tuition/recBad")
        .with_status(422)
        .with_body(
            json!({"error": {
                "type": "INVALID_VALUE_FOR_COLUMN",
                "message": "Field \"Punctuality\" cannot accept the provided value"
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server)
        .update_record("Tuition", "recBad", Fields::new())
        .await
        .unwrap_err();

    match &err {
        StoreError::Api { status, message, .. } => {
            assert_eq!(*status, 422);
            assert_eq!(
                message,
                "Field \"Punctuality\" cannot accept the provided value"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.upstream_message(),
        Some("Field \"Punctuality\" cannot accept the provided value")
    );
    assert_eq!(
        err.details().and_then(|d| d.get("type")),
        Some(&json!("INVALID_VALUE_FOR_COLUMN"))
    );
}

#[tokio::test]
async fn test_string_error_is_kept_as_details_only() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PATCH", "/v0/appTest/Tuition/recGone")
        .with_status(404)
        .with_body(r#"{"error": "NOT_FOUND"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .update_record("Tuition", "recGone", Fields::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Api { status: 404, .. }));
    assert_eq!(err.upstream_message(), None);
    assert_eq!(err.details(), Some(&json!("NOT_FOUND")));
}

#[tokio::test]
async fn test_unstructured_error_falls_back_to_status_reason() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v0/appTest/Tuition")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = client_for(&server)
        .find_records("Tuition", "{Feedback ID} = 1")
        .await
        .unwrap_err();

    match &err {
        StoreError::Api {
            status,
            message,
            details,
        } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Service Unavailable");
            assert!(details.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.upstream_message(), None);
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v0/appTest/Tuition")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .find_records("Tuition", "{Feedback ID} = 1")
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Parse { .. }));
}
