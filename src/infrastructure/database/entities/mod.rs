//! Database entities module

pub mod gadget;
pub mod user;

pub use gadget::Entity as Gadget;
pub use user::Entity as User;
