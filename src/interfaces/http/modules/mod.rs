pub mod auth;
pub mod gadgets;
pub mod health;
pub mod metrics;
pub mod request_id;
