mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::Error;
use crate::server::handlers::{access, nearby, places};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/access", get(access::find))
        .route("/access/unlock", post(access::unlock))
        .route("/access/lock", post(access::lock))
        .route("/places", get(places::list).post(places::create))
        .route("/places/:id", get(places::find).patch(places::update))
        .route("/places/:id/nearby", get(nearby::find).post(nearby::fetch))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::server_error)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}
