//! CLI command implementations.

mod serve;

pub(crate) use serve::ServeArgs;
