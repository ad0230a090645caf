//! Adapter implementations of the content repository port.

pub mod memory;
pub mod postgres;
