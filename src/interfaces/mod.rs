//! Interface layer: how the outside world talks to the service

pub mod http;
