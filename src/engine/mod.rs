mod access_api;
mod nearby_api;
mod place_api;

use std::collections::HashMap;
use tokio::sync::{Mutex, Semaphore};
use uuid::Uuid;

use crate::{
    api::API,
    auth::{AccessGate, Authenticator, HostAuthenticator},
    config::Config,
    entities::LoadingState,
    error::Error,
    external::DirectoryClient,
    store::PlaceStore,
};

/// Per-place lookup states, valid for one unlocked period.
///
/// `generation` moves on every lock; a fetch may only record its result
/// under the generation it started in.
#[derive(Debug, Default)]
struct NearbyStates {
    generation: u64,
    states: HashMap<Uuid, LoadingState>,
}

/// Session-scoped owner of the place store, the access gate and the
/// directory client.
pub struct Engine<A> {
    store: Mutex<PlaceStore>,
    gate: AccessGate<A>,
    directory: DirectoryClient,
    nearby: Mutex<NearbyStates>,
    fetch_permits: Semaphore,
}

impl<A: Authenticator + Send + Sync> Engine<A> {
    pub fn new(
        store: PlaceStore,
        authenticator: A,
        directory: DirectoryClient,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            gate: AccessGate::new(authenticator),
            directory,
            nearby: Mutex::new(NearbyStates::default()),
            fetch_permits: Semaphore::new(max_concurrent_fetches),
        }
    }

    async fn ensure_unlocked(&self) -> Result<(), Error> {
        if self.gate.state().await.is_unlocked() {
            return Ok(());
        }

        Err(Error::locked_error())
    }
}

impl Engine<HostAuthenticator> {
    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let store = PlaceStore::open(config.save_path());
        let authenticator = HostAuthenticator::from_command_line(config.auth_command.as_deref());
        let directory = DirectoryClient::new(&config.directory_api_base, config.http_timeout)?;

        Ok(Self::new(
            store,
            authenticator,
            directory,
            config.max_concurrent_fetches,
        ))
    }
}

impl<A: Authenticator + Send + Sync> API for Engine<A> {}
