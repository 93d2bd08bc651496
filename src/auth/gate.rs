use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::Authenticator;
use crate::entities::AccessState;

pub const UNLOCK_REASON: &str = "Please authenticate yourself to unlock your places.";

/// Device-owner checkpoint in front of the user's places.
///
/// At most one prompt is in flight. Callers that arrive while a prompt is
/// pending wait for it and share its outcome.
#[derive(Debug)]
pub struct AccessGate<A> {
    authenticator: A,
    state: Mutex<AccessState>,
    attempt: Mutex<()>,
    completed: AtomicU64,
}

impl<A: Authenticator> AccessGate<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            state: Mutex::new(AccessState::default()),
            attempt: Mutex::new(()),
            completed: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> AccessState {
        *self.state.lock().await
    }

    pub fn is_authenticating(&self) -> bool {
        self.attempt.try_lock().is_err()
    }

    #[tracing::instrument(name = "AccessGate::lock", skip(self))]
    pub async fn lock(&self) {
        let _attempt = self.attempt.lock().await;
        *self.state.lock().await = AccessState::Locked;
    }

    #[tracing::instrument(name = "AccessGate::authenticate", skip(self))]
    pub async fn authenticate(&self) -> AccessState {
        let seen = self.completed.load(Ordering::Acquire);
        let _attempt = self.attempt.lock().await;

        if self.completed.load(Ordering::Acquire) != seen {
            // another caller's prompt resolved while we waited
            return self.state().await;
        }

        {
            let mut state = self.state.lock().await;
            match *state {
                AccessState::Unlocked => return AccessState::Unlocked,
                AccessState::Failed => *state = AccessState::Locked,
                AccessState::Locked => {}
            }
        }

        let outcome = if !self.authenticator.can_evaluate() {
            tracing::info!("authentication unavailable");
            AccessState::Failed
        } else if self.authenticator.evaluate(UNLOCK_REASON).await {
            AccessState::Unlocked
        } else {
            AccessState::Failed
        };

        *self.state.lock().await = outcome;
        self.completed.fetch_add(1, Ordering::AcqRel);

        tracing::info!(state = outcome.name(), "authentication finished");

        outcome
    }
}
