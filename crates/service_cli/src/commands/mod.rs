//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod cfd;
pub mod curve;
pub mod futures;
pub mod option;
pub mod quote;
