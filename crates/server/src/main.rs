mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod utils;

use crate::{config::AppConfig, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use axum::Router;
use database::db::create_connection;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let db = create_connection(&config.database_url).await?;
    if config.run_migrations {
        Migrator::up(&db, None).await?;
        info!("Database migrations applied");
    }
    let state = AppState { db };

    let mut oauth2 = <OAuth2ResourceServer>::builder().issuer_url(config.oidc_issuer_url.as_str());
    if let Some(audience) = &config.oidc_audience {
        oauth2 = oauth2.audiences(&[audience.as_str()]);
    }
    let oauth2_resource_server = oauth2
        .build()
        .await
        .map_err(|err| format!("Failed to build OAuth2 resource server: {err:?}"))?;

    let api = routes::api_router()
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .merge(routes::public_router())
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
