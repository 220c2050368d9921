//! # Ports Layer
//!
//! Defines the port traits for the versioned store.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving port (API exposed to the embedding application)
//! - `outbound.rs` - Driven ports (backends, serializer, container resolution)

pub mod inbound;
pub mod outbound;
