//! HTTP request extractors.
//!
//! The only extractor this gateway needs is the [`Session`]: the
//! request-scoped projection of the `accessToken` cookie's JWT claims. It is
//! the single source of truth for "who is making this request"; handlers
//! receive it as an explicit argument instead of reading cookies ambiently.

mod session;

pub use self::session::{
    Role, SESSION_COOKIE, Session, SessionClaims, TRACING_TARGET_SESSION,
};
