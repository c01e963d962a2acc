//! CLI command implementations

pub mod new;

pub use new::{Invocation, NewCommand, NewOptions, Outcome, Summary};
