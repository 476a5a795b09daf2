//! Collaborator contracts consumed by services and controllers.
//!
//! Everything the core needs from the outside world (HTTP transport,
//! credentials, authorization, toasts, confirmation dialogs) is expressed
//! as a trait here so views and tests can inject their own implementations.

pub mod authorization;
pub mod confirmation;
pub mod credentials;
pub mod notification;
pub mod transport;

pub use authorization::{Action, Authorization, RoleAuthorization, StaticAuthorization};
pub use confirmation::{ConfirmOutcome, ConfirmationPrompt, ConfirmationSurface, FixedConfirmation};
pub use credentials::{CredentialsProvider, StaticCredentials};
pub use notification::NotificationSink;
pub use transport::{ApiRequest, Method, Transport};
