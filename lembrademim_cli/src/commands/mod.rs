//! CLI subcommand implementations.

pub mod auth;
pub mod bios;
pub mod diagnose;
pub mod folders;
