//! Driven adapters implementing the domain's persistence ports.

pub mod memory;
