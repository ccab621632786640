//! Application layer: use-case services over the domain repositories

pub mod gadgets;
pub mod identity;

pub use gadgets::{DeletedGadget, GadgetService};
pub use identity::{AuthResult, AuthService};
