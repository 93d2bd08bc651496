use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{NearbyAPI, PlaceAPI},
    auth::Authenticator,
    entities::LoadingState,
    error::Error,
};

#[async_trait]
impl<A: Authenticator + Send + Sync> NearbyAPI for Engine<A> {
    #[tracing::instrument(skip(self))]
    async fn fetch_nearby(&self, id: Uuid) -> Result<LoadingState, Error> {
        let place = self.find_place(id).await?;

        let generation = {
            let mut nearby = self.nearby.lock().await;
            if !self.gate.state().await.is_unlocked() {
                return Err(Error::locked_error());
            }
            nearby.states.insert(id, LoadingState::Loading);
            nearby.generation
        };

        let state = {
            let _permit = self
                .fetch_permits
                .acquire()
                .await
                .map_err(|_| Error::unexpected_error())?;

            self.directory.fetch_nearby(&place).await
        };

        let mut nearby = self.nearby.lock().await;

        // locked while the request was out
        if nearby.generation != generation || !self.gate.state().await.is_unlocked() {
            tracing::debug!("discarding nearby result from a locked session");
            return Err(Error::locked_error());
        }

        nearby.states.insert(id, state.clone());

        Ok(state)
    }

    #[tracing::instrument(skip(self))]
    async fn nearby_state(&self, id: Uuid) -> Result<Option<LoadingState>, Error> {
        self.find_place(id).await?;

        Ok(self.nearby.lock().await.states.get(&id).cloned())
    }
}
