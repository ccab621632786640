//! Core business entities, state machine rules and repository traits.

pub mod error;
pub mod gadget;
pub mod repositories;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use gadget::{
    Gadget, GadgetChanges, GadgetQuery, GadgetRepository, GadgetStats, GadgetStatus, NewGadget,
    SortField, SortOrder,
};
pub use repositories::RepositoryProvider;
pub use user::{NewUser, User, UserRepository, UserRole};
