//! Tenant-managed HTML templates.

pub mod handlers;
pub mod model;

pub use model::DocumentTemplate;
