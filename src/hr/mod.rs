//! Read-only HR records used as document data sources.

pub mod models;

pub use models::{Capacitacion, Empleado, Empresa, Sancion, Vacacion};
