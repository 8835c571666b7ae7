//! Keyturn - Rotate AWS IAM access keys into GitHub Actions secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/               # Command-line interface
//! │   ├── rotate         # Run one rotation
//! │   ├── notify         # Terminal and GitHub Actions notifiers
//! │   ├── output         # Styled terminal output
//! │   └── completions    # Shell completions
//! └── core/              # Core library components
//!     ├── config         # keyturn.toml + flag/env layering
//!     ├── cipher/        # Sealed-box encryption
//!     ├── credentials/   # Access key provider (AWS IAM)
//!     ├── secrets/       # Secret stores (repository, environment, organization)
//!     ├── target         # Secret target selection
//!     └── rotation       # The rotation protocol
//! ```
//!
//! # Guarantees
//!
//! - Never creates a third access key: rotation is refused when the user
//!   already holds two
//! - The previous key is deleted only after both new secrets are published
//! - Organization secrets keep their visibility and selected repositories
//! - The new secret access key is never logged

pub mod cli;
pub mod core;
pub mod error;
