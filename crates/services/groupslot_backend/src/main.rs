// File: services/groupslot_backend/src/main.rs
use groupslot_common::log_result;
use groupslot_config::load_config;
use groupslot_notify::spawn_periodic;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

mod app_state;

use app_state::AppState;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    groupslot_common::logging::init();
    let config = Arc::new(
        log_result(load_config(), "Configuration loaded", "Failed to load config")
            .expect("Failed to load config"),
    );

    let state = AppState::new(config.clone()).expect("Failed to set up reminder delivery");
    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = state.router().expect("Invalid scheduling configuration");

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use groupslot_availability::doc::AvailabilityApiDoc;
        use groupslot_notify::doc::MeetingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Groupslot API",
                version = "0.1.0",
                description = "Group availability and meeting reminders",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AvailabilityApiDoc::openapi());
        openapi_doc.merge(MeetingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let scanner = spawn_periodic(Arc::new(state.scanner()), state.scan_period());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    scanner.shutdown().await;
}
