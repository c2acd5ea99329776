use std::collections::BTreeMap;

use actix_web::{
    HttpRequest, HttpResponse,
    web::{Data, Json, Path, Query},
};
use http_client::Method;
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::{ProxyError, Route},
    upstream::Upstream,
};

pub static HEALTH_MESSAGE: &str = "Fleet proxy API is running.";

type ProxyResult = Result<HttpResponse, ProxyError>;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(HEALTH_MESSAGE)
}

#[instrument(skip_all)]
pub async fn register(upstream: Data<Upstream>, body: Json<Value>) -> ProxyResult {
    let request = upstream.request(Method::POST, "register").json(&body.into_inner());
    upstream.relay(Route::Register, request).await
}

#[instrument(skip_all)]
pub async fn login(upstream: Data<Upstream>, body: Json<Value>) -> ProxyResult {
    let request = upstream.request(Method::POST, "login").json(&body.into_inner());
    upstream.relay(Route::Login, request).await
}

#[instrument(skip_all)]
pub async fn add_frame(
    upstream: Data<Upstream>,
    incoming: HttpRequest,
    body: Json<Value>,
) -> ProxyResult {
    let request = upstream
        .authorized(Method::POST, "gps", &incoming)
        .json(&body.into_inner());
    upstream.relay(Route::Gps, request).await
}

#[instrument(skip(upstream, incoming))]
pub async fn delete_frame(
    upstream: Data<Upstream>,
    incoming: HttpRequest,
    id: Path<String>,
) -> ProxyResult {
    let request = upstream.authorized(Method::DELETE, &format!("gps/{id}"), &incoming);
    upstream.relay(Route::DeleteGps, request).await
}

#[instrument(skip(upstream, incoming))]
pub async fn frames(
    upstream: Data<Upstream>,
    incoming: HttpRequest,
    params: Query<BTreeMap<String, String>>,
) -> ProxyResult {
    let request = upstream
        .authorized(Method::GET, "frames", &incoming)
        .query(&params.into_inner());
    upstream.relay(Route::Frames, request).await
}

#[instrument(skip_all)]
pub async fn latest_boats(upstream: Data<Upstream>, incoming: HttpRequest) -> ProxyResult {
    let request = upstream.authorized(Method::GET, "boats/latest", &incoming);
    upstream.relay(Route::LatestBoats, request).await
}

#[instrument(skip_all)]
pub async fn boats(upstream: Data<Upstream>, incoming: HttpRequest) -> ProxyResult {
    let request = upstream.authorized(Method::GET, "boats", &incoming);
    upstream.relay(Route::Boats, request).await
}

#[instrument(skip_all)]
pub async fn add_boat(
    upstream: Data<Upstream>,
    incoming: HttpRequest,
    body: Json<Value>,
) -> ProxyResult {
    let request = upstream
        .authorized(Method::POST, "boats", &incoming)
        .json(&body.into_inner());
    upstream.relay(Route::AddBoat, request).await
}

#[instrument(skip(upstream, incoming))]
pub async fn delete_boat(
    upstream: Data<Upstream>,
    incoming: HttpRequest,
    id: Path<String>,
) -> ProxyResult {
    let request = upstream.authorized(Method::DELETE, &format!("boats/{id}"), &incoming);
    upstream.relay(Route::DeleteBoat, request).await
}
