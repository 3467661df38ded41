//! Graph infrastructure
//!
//! Both modules extend `Graph` with inherent methods.

pub mod pretty;
pub mod schedule;

pub use pretty::describe_record;
