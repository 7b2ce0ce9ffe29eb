//! Remote session capability surface for skipper transfers.
//!
//! Defines the [`RemoteSession`] trait that the surrounding tool
//! implements on top of its SSH transport, plus the session error
//! type. Transfer logic consumes `&dyn RemoteSession` and never sees
//! the transport.

pub mod error;
pub mod session;

pub use error::SessionError;
pub use session::RemoteSession;
