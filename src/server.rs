//! HTTP server wiring

use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::config::Settings;
use crate::handlers::{groups, health, reviews};
use crate::middleware::RequestLogging;
use crate::state::AppState;

/// Register every route on an app or test service
///
/// `/groups` and `/reviews` accept any method; the handlers answer `OPTIONS`
/// themselves and reject what they do not serve with 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/groups").route(web::route().to(groups::handle)))
        .service(web::resource("/reviews").route(web::route().to(reviews::handle)))
        .service(web::resource("/health").route(web::get().to(health::health)));
}

/// Serve until the process receives a shutdown signal
pub async fn run(settings: &Settings, state: AppState) -> std::io::Result<()> {
    let state = web::Data::new(state);
    let bind = (settings.server.host.clone(), settings.server.port);

    info!(host = %bind.0, port = bind.1, "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogging)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
