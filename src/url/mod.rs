//! URL handling module
//!
//! The audit URL is the only client input the core accepts. It is checked here,
//! before any provider is contacted.

mod validate;

pub use validate::validate_audit_url;
