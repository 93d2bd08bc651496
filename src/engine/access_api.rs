use super::Engine;

use async_trait::async_trait;

use crate::{api::AccessAPI, auth::Authenticator, entities::AccessState};

#[async_trait]
impl<A: Authenticator + Send + Sync> AccessAPI for Engine<A> {
    async fn access_state(&self) -> AccessState {
        self.gate.state().await
    }

    #[tracing::instrument(skip(self))]
    async fn unlock(&self) -> AccessState {
        self.gate.authenticate().await
    }

    #[tracing::instrument(skip(self))]
    async fn lock(&self) -> AccessState {
        self.gate.lock().await;

        let mut nearby = self.nearby.lock().await;
        nearby.generation += 1;
        nearby.states.clear();

        AccessState::Locked
    }
}
