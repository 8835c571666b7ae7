//! Core library components.
//!
//! This module contains the rotation protocol and the collaborators it
//! drives: the credential provider, the secret stores, and the cipher.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod rotation;
pub mod secrets;
pub mod target;
pub mod types;
pub mod validation;
