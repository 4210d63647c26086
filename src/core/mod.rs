//! Core business logic module
//!
//! This module contains the ledger components:
//! - `money` - Conversion between decimal amounts and integer minor units
//! - `registry` - Concurrent account table with get-or-create semantics
//! - `transfer` - Lock-free money transfer between two accounts
//! - `engine` - Request dispatch onto the registry and transfer engine
//! - `batch_processor` - Concurrent execution of request batches on tokio

pub mod batch_processor;
pub mod engine;
pub mod money;
pub mod registry;
pub mod transfer;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::LedgerEngine;
pub use registry::AccountRegistry;
pub use transfer::TransferEngine;
