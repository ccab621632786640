//! Gadget inventory use-cases

mod service;

pub use service::{DeletedGadget, GadgetService};
