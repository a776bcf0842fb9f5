//! Session controller
//!
//! Drives one login flow: validate the input, authenticate, keep the returned
//! session, then fetch the catalog with it. The controller outlives any view;
//! hosts read its state through accessors and receive [`SessionEvent`]s over a
//! channel instead of registering callbacks.
//!
//! State transitions:
//!
//! ```text
//! LoggedOut --submit(valid)--> Authenticating --ok--> LoggedIn
//!     |                             |
//!     +--submit(invalid)--> Error <-+--err
//!                            |
//!                            +--submit(valid)--> Authenticating
//! ```
//!
//! `LoggedIn` is terminal. A catalog failure after login is reported as
//! [`SessionEvent::CatalogFetchFailed`] and does not leave `LoggedIn`.

use access_client::{
    AccessError, ApiClient, AuthClient, Authenticator, CatalogClient, CatalogItem, CatalogSource,
    ClientConfig, Credentials, Session,
};
use app_core::validation::{validate_credentials, ValidationError};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::form::LoginForm;

/// Controller errors
///
/// These reject a request outright; failures of an accepted login are
/// reported through state and events instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// A login is already in flight
    #[error("A login is already in progress")]
    LoginInFlight,

    /// The controller already holds a session
    #[error("Already logged in")]
    AlreadyLoggedIn,

    /// A required form field is empty
    #[error("Both identifier and password are required")]
    IncompleteForm,

    /// The event receiver was already handed out
    #[error("Event receiver already taken")]
    AlreadySubscribed,

    /// `shutdown` was called; no further logins are started
    #[error("Controller has been shut down")]
    ShutDown,

    /// Called outside a Tokio runtime, so the login cannot be spawned
    #[error("No Tokio runtime available")]
    NoRuntime,
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Login state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginState {
    /// No login attempted yet
    #[default]
    LoggedOut,

    /// Waiting for the login endpoint
    Authenticating,

    /// A session was obtained
    LoggedIn,

    /// The last attempt failed validation or authentication
    Error,
}

/// Events published to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Input failed validation; no request was made
    LoginRejected(ValidationError),

    /// The login request failed
    LoginFailed(AccessError),

    /// A session was obtained
    LoggedIn,

    /// The catalog was fetched and stored
    CatalogLoaded(usize),

    /// The catalog fetch after login failed; the session is kept
    CatalogFetchFailed(AccessError),
}

#[derive(Debug, Default)]
struct Shared {
    state: LoginState,
    session: Option<Session>,
    catalog: Vec<CatalogItem>,
    error_visible: bool,
}

impl Shared {
    fn fail(&mut self) {
        self.state = LoginState::Error;
        self.error_visible = true;
    }
}

/// Orchestrates validation, login and the catalog fetch
///
/// # Example
///
/// ```rust,no_run
/// use access_client::ClientConfig;
/// use app_state::{SessionController, SessionEvent};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let controller = SessionController::from_config(ClientConfig::default())?;
///     let mut events = controller.subscribe()?;
///
///     controller.submit_login("AB1234", "Abc1234!")?;
///     while let Some(event) = events.recv().await {
///         println!("{:?}", event);
///         if matches!(event, SessionEvent::CatalogLoaded(_)) {
///             break;
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct SessionController {
    auth: Arc<dyn Authenticator>,
    catalog_source: Arc<dyn CatalogSource>,
    shared: Arc<RwLock<Shared>>,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: Mutex<Option<UnboundedReceiver<SessionEvent>>>,
    cancel: CancellationToken,
}

impl SessionController {
    /// Create a controller over the given endpoint clients
    pub fn new(auth: Arc<dyn Authenticator>, catalog_source: Arc<dyn CatalogSource>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            auth,
            catalog_source,
            shared: Arc::new(RwLock::new(Shared::default())),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            cancel: CancellationToken::new(),
        }
    }

    /// Create a controller talking HTTP to the configured backend
    pub fn from_config(config: ClientConfig) -> access_client::Result<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self::new(
            Arc::new(AuthClient::new(client.clone())),
            Arc::new(CatalogClient::new(client)),
        ))
    }

    /// Take the event receiver
    ///
    /// Events published before the first call are buffered.
    pub fn subscribe(&self) -> Result<UnboundedReceiver<SessionEvent>> {
        self.events_rx.lock().take().ok_or(ControllerError::AlreadySubscribed)
    }

    /// Submit the form's current input
    pub fn submit_form(&self, form: &LoginForm) -> Result<()> {
        if !form.can_submit() {
            return Err(ControllerError::IncompleteForm);
        }
        self.start(form.credentials())
    }

    /// Start a login attempt
    ///
    /// Invalid input moves the controller to [`LoginState::Error`] without a
    /// network call and still returns `Ok`. Valid input moves it to
    /// [`LoginState::Authenticating`] and spawns the login on the current Tokio
    /// runtime; the outcome arrives as events.
    ///
    /// # Errors
    ///
    /// - `ControllerError::ShutDown` - the controller was shut down
    /// - `ControllerError::LoginInFlight` - a login is already running
    /// - `ControllerError::AlreadyLoggedIn` - a session is already held
    /// - `ControllerError::NoRuntime` - valid input, but no runtime to run on
    pub fn submit_login(&self, identifier: &str, secret: &str) -> Result<()> {
        self.start(Credentials::new(identifier, secret))
    }

    fn start(&self, credentials: Credentials) -> Result<()> {
        let runtime = {
            let mut shared = self.shared.write();
            if self.cancel.is_cancelled() {
                return Err(ControllerError::ShutDown);
            }
            match shared.state {
                LoginState::Authenticating => return Err(ControllerError::LoginInFlight),
                LoginState::LoggedIn => return Err(ControllerError::AlreadyLoggedIn),
                LoginState::LoggedOut | LoginState::Error => {}
            }

            if let Err(err) = validate_credentials(&credentials.identifier, &credentials.secret) {
                shared.fail();
                drop(shared);
                tracing::info!(error = %err, "Login rejected by validation");
                self.publish(SessionEvent::LoginRejected(err));
                return Ok(());
            }

            // State is only touched once the flow is sure to be spawned
            let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
            shared.state = LoginState::Authenticating;
            runtime
        };

        tracing::debug!(identifier = %credentials.identifier, "Login started");
        let flow = LoginFlow {
            auth: Arc::clone(&self.auth),
            catalog_source: Arc::clone(&self.catalog_source),
            shared: Arc::clone(&self.shared),
            events_tx: self.events_tx.clone(),
            cancel: self.cancel.child_token(),
        };
        runtime.spawn(flow.run(credentials));

        Ok(())
    }

    /// Current login state
    pub fn state(&self) -> LoginState {
        self.shared.read().state
    }

    /// Whether a session is held
    pub fn is_logged_in(&self) -> bool {
        self.state() == LoginState::LoggedIn
    }

    /// The current session, if logged in
    pub fn session(&self) -> Option<Session> {
        self.shared.read().session.clone()
    }

    /// The last fetched catalog, sorted by release date
    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.shared.read().catalog.clone()
    }

    /// Whether the host should show the error dialog
    pub fn is_error_visible(&self) -> bool {
        self.shared.read().error_visible
    }

    /// Acknowledge the error dialog
    pub fn dismiss_error(&self) {
        self.shared.write().error_visible = false;
    }

    /// Cancel any in-flight request
    ///
    /// A cancelled flow publishes nothing further and leaves state as is.
    /// Later submits are rejected with `ControllerError::ShutDown`.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn publish(&self, event: SessionEvent) {
        // No receiver means nobody is listening
        let _ = self.events_tx.send(event);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// One spawned login followed by its catalog fetch
struct LoginFlow {
    auth: Arc<dyn Authenticator>,
    catalog_source: Arc<dyn CatalogSource>,
    shared: Arc<RwLock<Shared>>,
    events_tx: UnboundedSender<SessionEvent>,
    cancel: CancellationToken,
}

impl LoginFlow {
    async fn run(self, credentials: Credentials) {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("Login cancelled");
                return;
            }
            result = self.auth.login(&credentials) => result,
        };
        drop(credentials);

        let session = match result {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "Login failed");
                self.shared.write().fail();
                self.publish(SessionEvent::LoginFailed(err));
                return;
            }
        };

        {
            let mut shared = self.shared.write();
            shared.session = Some(session.clone());
            shared.state = LoginState::LoggedIn;
        }
        tracing::info!("Logged in");
        self.publish(SessionEvent::LoggedIn);

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("Catalog fetch cancelled");
                return;
            }
            result = self.catalog_source.fetch_catalog(&session) => result,
        };

        match result {
            Ok(items) => {
                let count = items.len();
                self.shared.write().catalog = items;
                self.publish(SessionEvent::CatalogLoaded(count));
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "Catalog fetch failed");
                self.publish(SessionEvent::CatalogFetchFailed(err));
            }
        }
    }

    fn publish(&self, event: SessionEvent) {
        let _ = self.events_tx.send(event);
    }
}
