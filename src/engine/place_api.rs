use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    auth::Authenticator,
    entities::{Coordinates, Place, PlaceUpdate},
    error::Error,
};

#[async_trait]
impl<A: Authenticator + Send + Sync> PlaceAPI for Engine<A> {
    #[tracing::instrument(skip(self))]
    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        self.ensure_unlocked().await?;

        Ok(self.store.lock().await.places().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        self.ensure_unlocked().await?;

        let store = self.store.lock().await;
        let place = store.get(id).ok_or_else(Error::not_found_error)?;

        Ok(place.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn add_place(&self, at: Coordinates) -> Result<Place, Error> {
        self.ensure_unlocked().await?;

        self.store.lock().await.add(at)
    }

    #[tracing::instrument(skip(self))]
    async fn update_place(&self, id: Uuid, update: PlaceUpdate) -> Result<Place, Error> {
        self.ensure_unlocked().await?;

        self.store.lock().await.update(id, update)
    }
}
