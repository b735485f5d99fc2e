//! Bill splitting.
//!
//! This module implements the split pipeline:
//! - Request and response types (decimal strings on the wire)
//! - Validation into a minor-unit snapshot
//! - Item split, declared-total adjustment, tip and tip distribution
//! - Conservation checks on every result

pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod engine_props;

pub use engine::SplitEngine;
pub use error::{SplitError, ValidationError};
pub use types::{
    Allocation, ItemInput, ItemShare, ParticipantAllocation, ParticipantInput, ParticipantShare,
    ResolvedItem, SplitRequest, SplitResponse, TipMode, TipRule, ValidatedBill,
};
pub use validation::validate_request;
