use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{AccessState, Coordinates, LoadingState, Place, PlaceUpdate};
use crate::error::Error;

#[async_trait]
pub trait AccessAPI {
    async fn access_state(&self) -> AccessState;
    async fn unlock(&self) -> AccessState;
    async fn lock(&self) -> AccessState;
}

#[async_trait]
pub trait PlaceAPI {
    async fn list_places(&self) -> Result<Vec<Place>, Error>;
    async fn find_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn add_place(&self, at: Coordinates) -> Result<Place, Error>;
    async fn update_place(&self, id: Uuid, update: PlaceUpdate) -> Result<Place, Error>;
}

#[async_trait]
pub trait NearbyAPI {
    async fn fetch_nearby(&self, id: Uuid) -> Result<LoadingState, Error>;
    async fn nearby_state(&self, id: Uuid) -> Result<Option<LoadingState>, Error>;
}

pub trait API: AccessAPI + PlaceAPI + NearbyAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
