//! Gadget aggregate
//!
//! Contains the Gadget entity, its status state machine, list queries and
//! the repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{Gadget, GadgetChanges, GadgetStatus, NewGadget, CODENAME_MAX_LEN, NAME_MAX_LEN};
pub use query::{GadgetQuery, GadgetStats, SortField, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use repository::GadgetRepository;
