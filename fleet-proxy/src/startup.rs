use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    HttpServer,
    dev::Server,
    http::header,
    web::{self, Data},
};
use snafu::ResultExt;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    error::{
        Result,
        error::{BindSnafu, HttpClientSnafu},
    },
    routes,
    settings::Settings,
    upstream::Upstream,
};

pub struct App {
    server: Server,
    port: u16,
}

impl App {
    pub async fn build(settings: &Settings) -> Result<Self> {
        let listener = TcpListener::bind(settings.api.listener_address()).context(BindSnafu)?;
        let port = listener.local_addr().context(BindSnafu)?.port();

        let upstream = Upstream::new(&settings.backend_url, settings.request_timeout)
            .context(HttpClientSnafu)?;

        let server = create_server(upstream, listener, settings).context(BindSnafu)?;

        info!(port, backend = %settings.backend_url, "fleet proxy listening");

        Ok(App { server, port })
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers([
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

fn create_server(
    upstream: Upstream,
    listener: TcpListener,
    settings: &Settings,
) -> std::io::Result<Server> {
    let allowed_origins = settings.allowed_origins.clone();

    let mut server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(Data::new(upstream.clone()))
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .route("/", web::get().to(routes::health))
            .route("/register", web::post().to(routes::register))
            .route("/login", web::post().to(routes::login))
            .route("/gps", web::post().to(routes::add_frame))
            .route("/gps/{id}", web::delete().to(routes::delete_frame))
            .route("/frames", web::get().to(routes::frames))
            .route("/boats/latest", web::get().to(routes::latest_boats))
            .route("/boats", web::get().to(routes::boats))
            .route("/boats", web::post().to(routes::add_boat))
            .route("/boats/{id}", web::delete().to(routes::delete_boat))
    })
    .listen(listener)?;

    if let Some(workers) = settings.api.num_workers {
        server = server.workers(workers as usize);
    }

    Ok(server.run())
}
