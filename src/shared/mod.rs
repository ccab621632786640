//! Cross-cutting helpers shared by every layer

pub mod shutdown;
pub mod types;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
pub use types::*;
