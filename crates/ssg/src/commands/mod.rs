//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod dev;

pub(crate) use build::BuildArgs;
pub(crate) use dev::DevArgs;
