//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod convert;
pub mod flag;
pub mod logo;
pub mod patch;
