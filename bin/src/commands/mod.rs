//! CLI command implementations.

pub(crate) mod endpoints;
pub(crate) mod fetch;
pub(crate) mod snapshot;
