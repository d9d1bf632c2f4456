//! End-to-end tests for the async executor against a mock service.
//!
//! These tests drive full command flows — compile, dispatch, status
//! mapping, decode — against a wiremock server, verifying the wire shapes
//! (methods, paths, query strings, bodies, headers) as well as the typed
//! outcomes.

use odata_client::{
    Command, Credentials, Entry, ODataClient, ODataError, ServiceConfig, ServiceRoot,
    TrackedEntry, Value,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server.
fn client_for(server: &MockServer) -> ODataClient {
    let config = ServiceConfig::builder()
        .service_root(ServiceRoot::new(server.uri()).unwrap())
        .build()
        .unwrap();
    ODataClient::new(&config)
}

// ============================================================================
// Insert
// ============================================================================

#[tokio::test]
async fn test_insert_posts_full_entry_and_decodes_created_entity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Products"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"Name": "Test1", "Price": 18})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"ID": 1, "Name": "Test1", "Price": 18})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .insert(
            &Command::for_collection("Products")
                .set(Entry::new().with("Name", "Test1").with("Price", 18)),
        )
        .await
        .unwrap();

    assert_eq!(created.get("Name"), Some(&Value::from("Test1")));
    assert_eq!(created.get("ID"), Some(&Value::from(1)));
}

#[tokio::test]
async fn test_insert_failure_surfaces_status_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Products"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"error":"Name is required"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .insert(&Command::for_collection("Products").set(Entry::new().with("Price", 18)))
        .await;

    match result {
        Err(ODataError::Protocol { status, body }) => {
            assert_eq!(status, 422);
            assert!(body.contains("Name is required"));
        }
        other => panic!("expected a protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_insert_without_created_entity_echo_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Products"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .insert(&Command::for_collection("Products").set(Entry::new().with("Name", "Test1")))
        .await;

    assert!(matches!(result, Err(ODataError::Decode(_))));
}

// ============================================================================
// Find
// ============================================================================

#[tokio::test]
async fn test_find_one_by_key_decodes_the_entity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products(1)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ID": 1, "Name": "Test1", "Price": 18})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .find_one(&Command::for_collection("Products").key(1))
        .await
        .unwrap()
        .expect("entity should exist");

    assert_eq!(found.get("Name"), Some(&Value::from("Test1")));
    assert_eq!(found.get("Price"), Some(&Value::from(18)));
}

#[tokio::test]
async fn test_find_one_missing_entity_is_absence_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products(99)"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .find_one(&Command::for_collection("Products").key(99))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_one_by_filter_returns_the_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .and(query_param("$filter", "Name eq 'Test1'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"ID": 1, "Name": "Test1"},
                {"ID": 2, "Name": "Test1"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .find_one(&Command::for_collection("Products").filter("Name eq 'Test1'"))
        .await
        .unwrap()
        .expect("a match should exist");

    assert_eq!(found.get("ID"), Some(&Value::from(1)));
}

#[tokio::test]
async fn test_find_one_by_filter_with_no_matches_is_absence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .and(query_param("$filter", "Name eq 'Test1'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .find_one(&Command::for_collection("Products").filter("Name eq 'Test1'"))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_all_decodes_the_whole_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"ID": 1}, {"ID": 2}, {"ID": 3}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client
        .find_all(&Command::for_collection("Products"))
        .await
        .unwrap();

    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_find_all_supports_the_legacy_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"results": [{"ID": 1, "Name": "Test1"}]}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client
        .find_all(&Command::for_collection("Products"))
        .await
        .unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get("Name"), Some(&Value::from("Test1")));
}

#[tokio::test]
async fn test_find_all_404_is_an_empty_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Discontinued"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client
        .find_all(&Command::for_collection("Discontinued"))
        .await
        .unwrap();

    assert!(all.is_empty());
}

#[tokio::test]
async fn test_find_with_select_requests_the_property_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .and(query_param("$select", "Name,Price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"value": [{"Name": "Test1", "Price": 18}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client
        .find_all(&Command::for_collection("Products").select(["Name", "Price"]))
        .await
        .unwrap();

    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products(1)"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .find_one(&Command::for_collection("Products").key(1))
        .await;

    assert!(matches!(result, Err(ODataError::Decode(_))));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.find_all(&Command::for_collection("Products")).await;

    match result {
        Err(ODataError::Protocol { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected a protocol error, got {other:?}"),
    }
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_patches_only_the_set_properties() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/Products(1)"))
        .and(body_json(json!({"Price": 123})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ID": 1, "Name": "Test1", "Price": 123})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .update(
            &Command::for_collection("Products")
                .key(1)
                .set(Entry::new().with("Price", 123)),
        )
        .await
        .unwrap()
        .expect("service echoed the entity");

    assert_eq!(updated.get("Price"), Some(&Value::from(123)));
    assert_eq!(updated.get("Name"), Some(&Value::from("Test1")));
}

#[tokio::test]
async fn test_update_with_bodiless_204_yields_no_entity() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/Products(1)"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .update(
            &Command::for_collection("Products")
                .key(1)
                .set(Entry::new().with("Price", 123)),
        )
        .await
        .unwrap();

    assert!(updated.is_none());
}

#[tokio::test]
async fn test_update_of_missing_entity_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/Products(99)"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .update(
            &Command::for_collection("Products")
                .key(99)
                .set(Entry::new().with("Price", 123)),
        )
        .await;

    match result {
        Err(ODataError::NotFound { collection, target }) => {
            assert_eq!(collection, "Products");
            assert_eq!(target, "99");
        }
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tracked_update_sends_exactly_the_changed_subset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Products(1)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ID": 1, "Name": "Test1", "Price": 18})),
        )
        .mount(&server)
        .await;

    // The body matcher proves the diff: only Price goes on the wire.
    Mock::given(method("PATCH"))
        .and(path("/Products(1)"))
        .and(body_json(json!({"Price": 123})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let observed = client
        .find_one(&Command::for_collection("Products").key(1))
        .await
        .unwrap()
        .expect("entity should exist");

    let mut tracked = TrackedEntry::from_existing(observed);
    tracked.insert("Price", 123);

    client
        .update(
            &Command::for_collection("Products")
                .key(1)
                .set_tracked(&tracked),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_tracked_update_clears_removed_properties_with_null() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/Products(1)"))
        .and(body_json(json!({"Rating": null})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let mut tracked =
        TrackedEntry::from_existing(Entry::new().with("Name", "Test1").with("Rating", 5));
    tracked.remove("Rating");

    client
        .update(
            &Command::for_collection("Products")
                .key(1)
                .set_tracked(&tracked),
        )
        .await
        .unwrap();
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_then_find_yields_absence() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Products(1)"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Products(1)"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let command = Command::for_collection("Products").key(1);

    client.delete(&command).await.unwrap();

    let found = client.find_one(&command).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_delete_of_missing_entity_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Products(99)"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .delete(&Command::for_collection("Products").key(99))
        .await;

    assert!(matches!(result, Err(ODataError::NotFound { .. })));
}

// ============================================================================
// Credentials and headers
// ============================================================================

#[tokio::test]
async fn test_basic_credentials_are_attached_as_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ServiceConfig::builder()
        .service_root(ServiceRoot::new(server.uri()).unwrap())
        .credentials(Credentials::basic("user", "pass"))
        .build()
        .unwrap();
    let client = ODataClient::new(&config);

    client
        .find_all(&Command::for_collection("Products"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_every_request_accepts_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .find_all(&Command::for_collection("Products"))
        .await
        .unwrap();
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_one_chain_can_drive_concurrent_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Products(1)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let command = Command::for_collection("Products").key(1);

    let (first, second) = tokio::join!(client.find_one(&command), client.find_one(&command));

    assert!(first.unwrap().is_some());
    assert!(second.unwrap().is_some());
}
