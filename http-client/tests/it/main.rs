use http_client::{HttpClient, StatusCode};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boats/latest"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::builder().max_retries(0).build().unwrap();
    let body: Value = client
        .get(format!("{}/boats/latest", server.uri()))
        .bearer(Some("abc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn test_non_success_status_is_an_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/gps/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "success": false, "message": "no such frame" })),
        )
        .mount(&server)
        .await;

    let client = HttpClient::builder().max_retries(0).build().unwrap();
    let error = client
        .delete(format!("{}/gps/9", server.uri()))
        .send()
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(error.message().as_deref(), Some("no such frame"));
}

#[tokio::test]
async fn test_empty_body_decodes_as_null() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gps"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = HttpClient::builder().max_retries(0).build().unwrap();
    let value = client
        .post(format!("{}/gps", server.uri()))
        .json(&json!({ "boat_name": "Endurance" }))
        .send()
        .await
        .unwrap()
        .json_value()
        .await
        .unwrap();

    assert_eq!(value, Value::Null);
}
