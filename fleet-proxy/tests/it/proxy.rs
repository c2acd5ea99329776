use fleet_proxy::routes::HEALTH_MESSAGE;
use http_client::{Method, StatusCode};
use serde_json::{Value, json};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

use crate::helper::{ALLOWED_ORIGIN, NoAuthorization, TestHelper, spawn_proxy};

fn error_body(e: &http_client::Error) -> Value {
    serde_json::from_str(e.body().unwrap()).unwrap()
}

#[tokio::test]
async fn test_health_route_answers_text() {
    let helper = TestHelper::new().await;

    let text = helper
        .client
        .get(helper.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(text, HEALTH_MESSAGE);
}

#[tokio::test]
async fn test_login_relays_backend_body_without_authorization() {
    let helper = TestHelper::new().await;
    let credentials = json!({ "username": "skipper", "password": "secret" });
    let answer = json!({ "success": true, "token": "abc", "role": "user", "userId": 4 });

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(&credentials))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(&answer))
        .expect(1)
        .mount(&helper.backend)
        .await;

    let body: Value = helper
        .client
        .post(helper.url("/login"))
        .json(&credentials)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, answer);
}

#[tokio::test]
async fn test_login_failure_is_always_500() {
    let helper = TestHelper::new().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "success": false, "message": "bad password" })),
        )
        .mount(&helper.backend)
        .await;

    let err = helper
        .client
        .post(helper.url("/login"))
        .json(&json!({ "username": "skipper", "password": "wrong" }))
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(
        error_body(&err),
        json!({ "success": false, "message": "Proxy API error (login)" })
    );
}

#[tokio::test]
async fn test_frames_forwards_query_and_authorization() {
    let helper = TestHelper::new().await;
    let frames = json!({ "success": true, "frames": [{ "id": 1, "boat_name": "Endurance" }] });

    Mock::given(method("GET"))
        .and(path("/frames"))
        .and(query_param("limit", "50"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&frames))
        .expect(1)
        .mount(&helper.backend)
        .await;

    let body: Value = helper
        .client
        .get(helper.url("/frames?limit=50"))
        .bearer(Some("abc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, frames);
}

#[tokio::test]
async fn test_latest_boats_relays_upstream_status() {
    let helper = TestHelper::new().await;
    Mock::given(method("GET"))
        .and(path("/boats/latest"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "expired" })))
        .mount(&helper.backend)
        .await;

    let err = helper
        .client
        .get(helper.url("/boats/latest"))
        .bearer(Some("stale"))
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(
        error_body(&err),
        json!({ "success": false, "message": "Proxy API error (boats/latest)" })
    );
}

#[tokio::test]
async fn test_missing_authorization_is_not_invented() {
    let helper = TestHelper::new().await;
    Mock::given(method("GET"))
        .and(path("/boats"))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&helper.backend)
        .await;

    let body: Value = helper
        .client
        .get(helper.url("/boats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_gps_relays_upstream_message() {
    let helper = TestHelper::new().await;
    Mock::given(method("DELETE"))
        .and(path("/gps/12"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "success": false, "message": "Frame 12 not found" })),
        )
        .mount(&helper.backend)
        .await;

    let err = helper
        .client
        .delete(helper.url("/gps/12"))
        .bearer(Some("abc"))
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        error_body(&err),
        json!({ "success": false, "message": "Frame 12 not found" })
    );
}

#[tokio::test]
async fn test_add_boat_forwards_body() {
    let helper = TestHelper::new().await;
    let boat = json!({ "name": "Endurance", "type": "Sailboat" });
    Mock::given(method("POST"))
        .and(path("/boats"))
        .and(body_json(&boat))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&helper.backend)
        .await;

    let response = helper
        .client
        .post(helper.url("/boats"))
        .bearer(Some("abc"))
        .json(&boat)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "success": true })
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_500() {
    let address = spawn_proxy("http://127.0.0.1:1".into()).await;
    let client = http_client::HttpClient::builder()
        .max_retries(0)
        .build()
        .unwrap();

    let err = client
        .delete(format!("{address}/boats/3"))
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(
        error_body(&err),
        json!({ "success": false, "message": "Proxy API error (delete boat)" })
    );
}

#[tokio::test]
async fn test_preflight_is_answered_for_allowed_origin() {
    let helper = TestHelper::new().await;

    let response = helper
        .client
        .request(Method::OPTIONS, helper.url("/gps/3"))
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "DELETE")
        .header("Access-Control-Request-Headers", "authorization")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}
