mod gate;
mod platform;

pub use gate::{AccessGate, UNLOCK_REASON};
pub use platform::{
    Authenticator, CommandAuthenticator, HostAuthenticator, UnavailableAuthenticator,
};
