use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{AccessAPI, DynAPI};
use crate::entities::AccessState;

#[derive(Serialize, Deserialize)]
pub struct AccessResponse {
    state: AccessState,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<AccessResponse> {
    let state = api.access_state().await;

    Json(AccessResponse { state })
}

pub async fn unlock(Extension(api): Extension<DynAPI>) -> Json<AccessResponse> {
    let state = api.unlock().await;

    Json(AccessResponse { state })
}

pub async fn lock(Extension(api): Extension<DynAPI>) -> Json<AccessResponse> {
    let state = api.lock().await;

    Json(AccessResponse { state })
}
