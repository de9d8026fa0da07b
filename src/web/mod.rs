mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::config::SimConfig;
use state::AppState;

pub use state::ParameterUpdate;

/// Register the UI and API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .route("/", web::get().to(handlers::index_html))
        .route("/app.js", web::get().to(handlers::app_js))
        .route("/style.css", web::get().to(handlers::style_css))
        // API routes
        .route("/api/defaults", web::get().to(handlers::defaults))
        .route("/api/simulate", web::post().to(handlers::simulate))
        .route("/api/sweep", web::post().to(handlers::sweep))
        .route("/api/session", web::post().to(handlers::create_session))
        .route("/api/session/{id}", web::get().to(handlers::get_session))
        .route("/api/session/{id}", web::patch().to(handlers::update_session))
        .route("/api/session/{id}", web::delete().to(handlers::delete_session))
        .route("/api/session/{id}/export", web::get().to(handlers::export_session));
}

pub async fn start_server(port: u16, config: SimConfig) -> std::io::Result<()> {
    let data = web::Data::new(AppState::new(config));

    info!(port, "starting web server");
    println!("Starting Tumor Growth Simulator web server on http://localhost:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allowed_origin(&format!("http://localhost:{port}"))
                    .allowed_origin(&format!("http://127.0.0.1:{port}"))
                    .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(data.clone())
            .configure(routes)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
