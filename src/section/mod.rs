//! Section registry, routes and the active-section state machine.

/// Registered sections.
pub mod registry;
/// Active-section state machine.
pub mod resolver;
/// Site routes.
pub mod route;
