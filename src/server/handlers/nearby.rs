use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::api::{DynAPI, NearbyAPI};
use crate::entities::LoadingState;
use crate::error::Error;

pub async fn fetch(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<LoadingState>, Error> {
    let state = api.fetch_nearby(id).await?;

    Ok(state.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<LoadingState>>, Error> {
    let state = api.nearby_state(id).await?;

    Ok(state.into())
}
