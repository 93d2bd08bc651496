use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// The host's device-owner authentication capability.
#[async_trait]
pub trait Authenticator {
    /// Whether the host can evaluate the device-owner policy at all.
    fn can_evaluate(&self) -> bool;

    /// Prompts the device owner, resolving once the host has decided.
    async fn evaluate(&self, reason: &str) -> bool;
}

/// A host without any authentication capability.
#[derive(Clone, Debug, Default)]
pub struct UnavailableAuthenticator;

#[async_trait]
impl Authenticator for UnavailableAuthenticator {
    fn can_evaluate(&self) -> bool {
        false
    }

    async fn evaluate(&self, _reason: &str) -> bool {
        false
    }
}

/// Delegates to a host command such as `fprintd-verify`.
///
/// The reason is passed as the last argument. Exit status 0 means the owner
/// was verified; anything else, including a failure to spawn, is a denial.
#[derive(Clone, Debug)]
pub struct CommandAuthenticator {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandAuthenticator {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace separated command line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;

        Some(Self::new(program, parts.map(String::from).collect()))
    }
}

#[async_trait]
impl Authenticator for CommandAuthenticator {
    fn can_evaluate(&self) -> bool {
        if self.program.components().count() > 1 {
            return self.program.is_file();
        }

        // bare program name, leave the lookup to PATH at spawn time
        !self.program.as_os_str().is_empty()
    }

    #[tracing::instrument(skip(self), fields(program = %self.program.display()))]
    async fn evaluate(&self, reason: &str) -> bool {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(reason)
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) => {
                tracing::debug!(%status, "authentication command finished");
                status.success()
            }
            Err(err) => {
                tracing::debug!(error = %err, "authentication command could not run");
                false
            }
        }
    }
}

/// Either host capability, picked from configuration.
#[derive(Clone, Debug)]
pub enum HostAuthenticator {
    Command(CommandAuthenticator),
    Unavailable(UnavailableAuthenticator),
}

impl HostAuthenticator {
    pub fn from_command_line(command_line: Option<&str>) -> Self {
        match command_line.and_then(CommandAuthenticator::parse) {
            Some(command) => HostAuthenticator::Command(command),
            None => HostAuthenticator::Unavailable(UnavailableAuthenticator),
        }
    }
}

#[async_trait]
impl Authenticator for HostAuthenticator {
    fn can_evaluate(&self) -> bool {
        match self {
            HostAuthenticator::Command(command) => command.can_evaluate(),
            HostAuthenticator::Unavailable(unavailable) => unavailable.can_evaluate(),
        }
    }

    async fn evaluate(&self, reason: &str) -> bool {
        match self {
            HostAuthenticator::Command(command) => command.evaluate(reason).await,
            HostAuthenticator::Unavailable(unavailable) => unavailable.evaluate(reason).await,
        }
    }
}
