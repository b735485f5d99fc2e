//! Split error types.
//!
//! `ValidationError` covers every way a request can be rejected before any
//! allocation happens; `SplitError::InvariantViolation` is reserved for
//! results that fail their own conservation checks.

use billsplit_shared::types::{ItemId, MoneyError, ParticipantId};
use thiserror::Error;

/// Errors found while validating a split request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ========== Currency ==========
    /// Currency code is not in the currency table.
    #[error("Unsupported currency: '{0}'")]
    UnsupportedCurrency(String),

    // ========== Participants ==========
    /// No participants were supplied.
    #[error("At least one participant is required")]
    NoParticipants,

    /// Participant ID is blank or too long.
    #[error("Participant at position {0} has an invalid id (1-64 characters required)")]
    InvalidParticipantId(usize),

    /// Participant name is blank or too long.
    #[error("Participant '{0}' has an invalid name (1-128 characters required)")]
    InvalidParticipantName(ParticipantId),

    /// Two participants share an ID.
    #[error("Participant ids must be unique, '{0}' appears more than once")]
    DuplicateParticipant(ParticipantId),

    // ========== Items ==========
    /// No items were supplied.
    #[error("At least one item is required")]
    NoItems,

    /// Item ID is blank or too long.
    #[error("Item at position {0} has an invalid id (1-64 characters required)")]
    InvalidItemId(usize),

    /// Item name is blank or too long.
    #[error("Item '{0}' has an invalid name (1-128 characters required)")]
    InvalidItemName(ItemId),

    /// Two items share an ID.
    #[error("Item ids must be unique, '{0}' appears more than once")]
    DuplicateItem(ItemId),

    /// An item references a participant that is not on the bill.
    #[error("Item '{item_id}' references unknown participant id '{participant_id}'")]
    UnknownParticipant {
        /// The referencing item.
        item_id: ItemId,
        /// The unknown participant reference.
        participant_id: ParticipantId,
    },

    // ========== Amounts ==========
    /// A money field could not be parsed at the currency's precision.
    #[error("Invalid amount for {field}: {source}")]
    InvalidAmount {
        /// Offending field path, e.g. `items[2].amount`.
        field: String,
        /// Parse failure.
        source: MoneyError,
    },

    /// A money field is negative.
    #[error("{field} cannot be negative")]
    NegativeAmount {
        /// Offending field path.
        field: String,
    },

    /// The summed amounts exceed the supported range.
    #[error("Amounts in {field} exceed the supported range")]
    AmountOverflow {
        /// Offending field path.
        field: String,
    },

    // ========== Tip ==========
    /// `tip_mode` is `percent` but `tip_percent` is missing.
    #[error("tip_percent is required when tip_mode is percent")]
    MissingTipPercent,

    /// `tip_mode` is `fixed` but `tip_fixed` is missing.
    #[error("tip_fixed is required when tip_mode is fixed")]
    MissingTipFixed,

    /// `tip_percent` is not a non-negative decimal with at most 2 decimal places below 10000.
    #[error("'{0}' is not a valid tip percentage")]
    InvalidTipPercent(String),
}

impl ValidationError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnsupportedCurrency(_) => "currency",
            Self::NoParticipants
            | Self::InvalidParticipantId(_)
            | Self::InvalidParticipantName(_)
            | Self::DuplicateParticipant(_) => "participants",
            Self::NoItems
            | Self::InvalidItemId(_)
            | Self::InvalidItemName(_)
            | Self::DuplicateItem(_)
            | Self::UnknownParticipant { .. } => "items",
            Self::InvalidAmount { field, .. }
            | Self::NegativeAmount { field }
            | Self::AmountOverflow { field } => field.as_str(),
            Self::MissingTipPercent | Self::InvalidTipPercent(_) => "tip_percent",
            Self::MissingTipFixed => "tip_fixed",
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::InvalidParticipantId(_) => "INVALID_PARTICIPANT_ID",
            Self::InvalidParticipantName(_) => "INVALID_PARTICIPANT_NAME",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::NoItems => "NO_ITEMS",
            Self::InvalidItemId(_) => "INVALID_ITEM_ID",
            Self::InvalidItemName(_) => "INVALID_ITEM_NAME",
            Self::DuplicateItem(_) => "DUPLICATE_ITEM",
            Self::UnknownParticipant { .. } => "UNKNOWN_PARTICIPANT",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::MissingTipPercent => "MISSING_TIP_PERCENT",
            Self::MissingTipFixed => "MISSING_TIP_FIXED",
            Self::InvalidTipPercent(_) => "INVALID_TIP_PERCENT",
        }
    }
}

/// Errors returned by the split engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The request was rejected before allocation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A computed result broke a conservation rule. Always a bug.
    #[error("Allocation invariant violated: {0}")]
    InvariantViolation(String),
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::NoParticipants.field(), "participants");
        assert_eq!(ValidationError::NoItems.field(), "items");
        assert_eq!(ValidationError::MissingTipPercent.field(), "tip_percent");
        assert_eq!(ValidationError::MissingTipFixed.field(), "tip_fixed");
        assert_eq!(
            ValidationError::NegativeAmount {
                field: "items[1].amount".into()
            }
            .field(),
            "items[1].amount"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::UnknownParticipant {
            item_id: ItemId::from("i1"),
            participant_id: ParticipantId::from("zed"),
        };
        assert_eq!(
            err.to_string(),
            "Item 'i1' references unknown participant id 'zed'"
        );

        let err = ValidationError::InvalidAmount {
            field: "tip_fixed".into(),
            source: MoneyError::InvalidFormat("abc".into()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount for tip_fixed: 'abc' is not a valid decimal amount"
        );
    }

    #[test]
    fn test_split_error_wraps_validation() {
        let err: SplitError = ValidationError::NoItems.into();
        assert_eq!(err.error_code(), "NO_ITEMS");
        assert_eq!(err.to_string(), "At least one item is required");
        assert_eq!(
            SplitError::InvariantViolation("x".into()).error_code(),
            "INVARIANT_VIOLATION"
        );
    }
}
