//! # Towerledger Test Suite
//!
//! Unified test crate for cross-crate scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── completion_flow.rs   # end-to-end workflow through dispatch
//!     └── persistence.rs       # registry over the file-backed ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p towerledger-tests
//!
//! # By category
//! cargo test -p towerledger-tests integration::
//! ```

pub mod integration;
