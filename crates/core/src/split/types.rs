//! Request/response contract and the validated bill snapshot.
//!
//! Money fields cross the boundary as decimal strings; inside the engine
//! every amount is an `i64` of minor units.

use billsplit_shared::types::{Currency, ItemId, Money, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// A person sharing the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInput {
    /// Unique within the request.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
}

/// A priced line item on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    /// Unique within the request.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Total cost of the item (not per person), as a decimal string.
    pub amount: String,
    /// Participants sharing this item. Absent or empty means everyone.
    #[serde(default)]
    pub participants: Option<Vec<ParticipantId>>,
}

/// How the tip is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipMode {
    /// Tip is a percentage of the pre-tip total.
    Percent,
    /// Tip is a fixed amount.
    Fixed,
}

/// Request body for splitting a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    /// ISO 4217 code; the engine default applies when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Participants in display order. Order breaks rounding ties.
    #[serde(default)]
    pub participants: Vec<ParticipantInput>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<ItemInput>,
    /// Declared pre-tip total (e.g. including tax or fees not itemized).
    #[serde(default)]
    pub total_before_tip: Option<String>,
    /// Tip mode.
    pub tip_mode: TipMode,
    /// Tip percentage, required when `tip_mode` is `percent`.
    #[serde(default)]
    pub tip_percent: Option<String>,
    /// Fixed tip amount, required when `tip_mode` is `fixed`.
    #[serde(default)]
    pub tip_fixed: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One participant's share of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemShare {
    /// Item ID.
    pub item_id: ItemId,
    /// Item name.
    pub item_name: String,
    /// Share of the item amount.
    pub amount: String,
}

/// Everything one participant owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    /// Participant ID.
    pub id: ParticipantId,
    /// Participant name.
    pub name: String,
    /// Sum of item shares.
    pub items: String,
    /// Share of the declared-total adjustment.
    pub adjustment: String,
    /// `items + adjustment`.
    pub pre_tip: String,
    /// Share of the tip.
    pub tip: String,
    /// `pre_tip + tip`.
    pub total: String,
    /// Per-item breakdown in item order.
    pub item_shares: Vec<ItemShare>,
}

/// Response body for a computed split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    /// Currency of every amount.
    pub currency: Currency,
    /// Sum of item amounts.
    pub subtotal: String,
    /// Declared total, or the subtotal when none was declared.
    pub total_before_tip: String,
    /// `total_before_tip - subtotal`.
    pub adjustment: String,
    /// Bill-level tip.
    pub tip: String,
    /// `total_before_tip + tip`.
    pub total_after_tip: String,
    /// One entry per participant, in request order.
    pub participants: Vec<ParticipantShare>,
}

// ============================================================================
// Validated Snapshot
// ============================================================================

/// A validated item with its amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    /// Item ID.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Amount in minor units, never negative.
    pub amount: i64,
    /// Indices into the participant list, ascending (request order), no duplicates.
    pub participants: Vec<usize>,
}

/// Validated tip rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipRule {
    /// Percentage of the pre-tip total.
    Percent(Decimal),
    /// Fixed amount in minor units.
    Fixed(i64),
}

/// Immutable snapshot of a request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBill {
    /// Currency of every amount.
    pub currency: Currency,
    /// Participants in request order.
    pub participants: Vec<ParticipantInput>,
    /// Items in request order.
    pub items: Vec<ResolvedItem>,
    /// Sum of item amounts in minor units.
    pub subtotal: i64,
    /// Declared pre-tip total in minor units.
    pub declared_total: Option<i64>,
    /// Tip rule.
    pub tip: TipRule,
}

impl ValidatedBill {
    /// Declared total, or the subtotal when none was declared.
    #[must_use]
    pub fn total_before_tip(&self) -> i64 {
        self.declared_total.unwrap_or(self.subtotal)
    }

    /// Formats minor units in this bill's currency.
    #[must_use]
    pub fn format(&self, minor: i64) -> String {
        Money::from_minor(minor, self.currency).to_string()
    }
}

// ============================================================================
// Allocation Result
// ============================================================================

/// One participant's allocation in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantAllocation {
    /// Sum of item shares.
    pub items: i64,
    /// Share of the adjustment.
    pub adjustment: i64,
    /// `items + adjustment`.
    pub pre_tip: i64,
    /// Share of the tip.
    pub tip: i64,
    /// `pre_tip + tip`.
    pub total: i64,
    /// `(item index, share)` in item order.
    pub item_shares: Vec<(usize, i64)>,
}

/// Bill-level totals plus per-participant allocations, all in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Sum of item amounts.
    pub subtotal: i64,
    /// Declared or computed pre-tip total.
    pub total_before_tip: i64,
    /// `total_before_tip - subtotal`.
    pub adjustment: i64,
    /// Bill-level tip.
    pub tip: i64,
    /// `total_before_tip + tip`.
    pub total_after_tip: i64,
    /// One entry per participant, in request order.
    pub participants: Vec<ParticipantAllocation>,
}
