use std::time::Duration;

use fleet_client::FleetApiClient;
use fleet_core::Credentials;
use gps_forwarder::forwarder::{Forwarder, LineOutcome, MAX_LINE_LENGTH};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

async fn forwarder(server: &MockServer, token: &str) -> Forwarder {
    let client = FleetApiClient::new(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_token(token);

    Forwarder::new(
        client,
        Credentials {
            username: "receiver".into(),
            password: "secret".into(),
        },
        "Endurance".into(),
    )
}

fn accept_gps(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/gps"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
}

#[tokio::test]
async fn test_parsed_line_is_posted_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .and(header("Authorization", "Bearer abc"))
        .and(body_json(json!({
            "boat_name": "Aurora",
            "latitude": 43.25,
            "longitude": 5.5,
            "raw_frame": "BOAT=Aurora;LAT=43.25;LON=5.5",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut forwarder = forwarder(&server, "abc").await;
    let outcome = forwarder.handle_line("BOAT=Aurora;LAT=43.25;LON=5.5").await;

    assert!(matches!(outcome, LineOutcome::Sent(_)));
}

#[tokio::test]
async fn test_refused_token_triggers_one_relogin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "receiver", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "token": "renewed" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    accept_gps("renewed").expect(1).mount(&server).await;

    let mut forwarder = forwarder(&server, "expired").await;
    let outcome = forwarder
        .handle_line("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47")
        .await;

    let LineOutcome::Sent(frame) = outcome else {
        panic!("expected frame to be sent, got {outcome:?}");
    };
    assert_eq!(frame.boat_name, "Endurance");
}

#[tokio::test]
async fn test_failed_relogin_gives_up_on_the_frame() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "locked" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut forwarder = forwarder(&server, "expired").await;
    let outcome = forwarder.handle_line("LAT=1.5;LON=2.5").await;

    assert!(matches!(outcome, LineOutcome::NotSent(_)));
}

#[tokio::test]
async fn test_forward_lines_skips_noise_until_end_of_input() {
    let server = MockServer::start().await;
    accept_gps("abc").expect(2).mount(&server).await;

    let input: &[u8] = b"booting receiver\r\n\
        $GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
        \xff\xfe\n\
        BOAT=Aurora;LAT=43.1;LON=5.1\n";

    let mut forwarder = forwarder(&server, "abc").await;
    forwarder.forward_lines(input).await.unwrap();
}

#[tokio::test]
async fn test_oversized_line_is_dropped_and_the_next_one_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .and(body_json(json!({
            "boat_name": "Aurora",
            "latitude": 43.1,
            "longitude": 5.1,
            "raw_frame": "BOAT=Aurora;LAT=43.1;LON=5.1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let mut input = b"LAT=1.0;LON=2.0;RAW=".to_vec();
    input.extend(std::iter::repeat_n(b'$', MAX_LINE_LENGTH * 4));
    input.extend_from_slice(b"\nBOAT=Aurora;LAT=43.1;LON=5.1\n");

    let mut forwarder = forwarder(&server, "abc").await;
    forwarder.forward_lines(input.as_slice()).await.unwrap();
}
