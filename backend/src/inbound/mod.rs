//! Inbound adapters mapping transports onto the domain.

pub mod http;
