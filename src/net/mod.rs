//! Identity networking: the backend boundary and everything built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` defines the backend trait, `firebase` and `popup` implement it
//! against the hosted platform, `auth_error` and `types` normalize what comes
//! back, and `gateway` is the only API the session store calls.

pub mod auth_error;
pub mod firebase;
pub mod gateway;
pub mod identity;
pub mod popup;
pub mod types;
