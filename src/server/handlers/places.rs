use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::api::{DynAPI, PlaceAPI};
use crate::entities::{Coordinates, Place, PlaceUpdate};
use crate::error::Error;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Place>>, Error> {
    let places = api.list_places().await?;

    Ok(places.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(at): Json<Coordinates>,
) -> Result<Json<Place>, Error> {
    let place = api.add_place(at).await?;

    Ok(place.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Place>, Error> {
    let place = api.find_place(id).await?;

    Ok(place.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(update): Json<PlaceUpdate>,
) -> Result<Json<Place>, Error> {
    let place = api.update_place(id, update).await?;

    Ok(place.into())
}
