//! Shared types for the Comanda order tracker
//!
//! This crate holds everything both the server and future clients agree on:
//!
//! - **Phases** (`phase`): the fixed preparation sequence and its metadata
//! - **Models** (`models`): tenants, menu items, orders and their timelines
//! - **Errors** (`error`): unified error codes, [`AppError`] and the
//!   [`ApiResponse`] envelope
//! - **Utilities** (`util`): timestamp helpers

pub mod error;
pub mod models;
pub mod phase;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use phase::OrderPhase;
