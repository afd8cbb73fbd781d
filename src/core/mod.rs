//! Core library components.
//!
//! This module contains the entry parsing, decryption and Secret assembly
//! logic. Nothing in here prints or reads process arguments.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod decrypt;
pub mod dotenv;
pub mod entry;
pub mod format;
pub mod generator;
pub mod loader;
pub mod secret;
pub mod staging;
pub mod types;
pub mod validation;
