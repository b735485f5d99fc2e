//! Split engine: item split, adjustment, tip and tip distribution.
//!
//! The engine is a pure function of its input. It validates the whole
//! request first, allocates in integer minor units, checks every
//! conservation rule on the result, and only then renders strings.

use billsplit_shared::types::Currency;

use crate::currency::{AllocationUtil, percent_of_minor};

use super::error::{SplitError, ValidationError};
use super::types::{
    Allocation, ItemShare, ParticipantAllocation, ParticipantShare, SplitRequest, SplitResponse,
    TipRule, ValidatedBill,
};
use super::validation::validate_request;

/// Stateless bill split engine.
///
/// Holds only immutable settings, so one instance can be shared across
/// threads and calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEngine {
    default_currency: Currency,
}

impl SplitEngine {
    /// Creates an engine that assumes `default_currency` when a request omits one.
    #[must_use]
    pub const fn new(default_currency: Currency) -> Self {
        Self { default_currency }
    }

    /// Currency used for requests without `currency`.
    #[must_use]
    pub const fn default_currency(&self) -> Currency {
        self.default_currency
    }

    /// Splits a bill.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Validation`] for malformed input and
    /// [`SplitError::InvariantViolation`] if the result fails its own
    /// conservation checks.
    pub fn compute(&self, request: &SplitRequest) -> Result<SplitResponse, SplitError> {
        let bill = validate_request(request, self.default_currency)?;
        let allocation = Self::allocate(&bill)?;
        allocation.check_invariants()?;
        Ok(render(&bill, &allocation))
    }

    /// Allocates a validated bill in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOverflow`] if the tip or grand total
    /// leaves the `i64` range.
    pub fn allocate(bill: &ValidatedBill) -> Result<Allocation, SplitError> {
        let mut participants = vec![ParticipantAllocation::default(); bill.participants.len()];

        // Stage 1: even split per item, remainder to the earliest participants
        for (item_idx, item) in bill.items.iter().enumerate() {
            let shares = AllocationUtil::allocate_equal(item.amount, item.participants.len());
            for (&participant_idx, share) in item.participants.iter().zip(shares) {
                let entry = &mut participants[participant_idx];
                entry.items += share;
                entry.item_shares.push((item_idx, share));
            }
        }

        // Stage 2: spread the declared-total difference by item totals
        let subtotal = bill.subtotal;
        let total_before_tip = bill.total_before_tip();
        let adjustment = total_before_tip - subtotal;
        let item_weights: Vec<u64> = participants.iter().map(|p| weight(p.items)).collect();
        let adjustments = AllocationUtil::apportion(adjustment, &item_weights);
        for (entry, share) in participants.iter_mut().zip(adjustments) {
            entry.adjustment = share;
            entry.pre_tip = entry.items + share;
        }

        // Stage 3: bill-level tip
        let tip = match bill.tip {
            TipRule::Percent(percent) => percent_of_minor(total_before_tip, percent)
                .ok_or_else(|| overflow("tip_percent"))?,
            TipRule::Fixed(amount) => amount,
        };
        let total_after_tip = total_before_tip
            .checked_add(tip)
            .ok_or_else(|| overflow("tip"))?;

        // Stage 4: spread the tip by pre-tip amounts
        let pre_tip_weights: Vec<u64> = participants.iter().map(|p| weight(p.pre_tip)).collect();
        let tips = AllocationUtil::apportion(tip, &pre_tip_weights);
        for (entry, share) in participants.iter_mut().zip(tips) {
            entry.tip = share;
            entry.total = entry.pre_tip + share;
        }

        Ok(Allocation {
            subtotal,
            total_before_tip,
            adjustment,
            tip,
            total_after_tip,
            participants,
        })
    }
}

impl Default for SplitEngine {
    fn default() -> Self {
        Self::new(Currency::Usd)
    }
}

/// Apportionment weight for a participant amount; negatives weigh nothing.
fn weight(amount: i64) -> u64 {
    u64::try_from(amount).unwrap_or(0)
}

fn overflow(field: &str) -> SplitError {
    ValidationError::AmountOverflow {
        field: field.to_string(),
    }
    .into()
}

impl Allocation {
    /// Verifies every conservation rule of a split.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvariantViolation`] naming the first broken rule.
    pub fn check_invariants(&self) -> Result<(), SplitError> {
        let sum = |f: fn(&ParticipantAllocation) -> i64| -> i64 {
            self.participants.iter().map(f).sum()
        };

        let checks = [
            ("sum of item shares equals subtotal", sum(|p| p.items) == self.subtotal),
            (
                "adjustment equals total_before_tip - subtotal",
                self.adjustment == self.total_before_tip - self.subtotal,
            ),
            (
                "sum of adjustments equals adjustment",
                sum(|p| p.adjustment) == self.adjustment,
            ),
            (
                "sum of pre-tip amounts equals total_before_tip",
                sum(|p| p.pre_tip) == self.total_before_tip,
            ),
            ("sum of tips equals tip", sum(|p| p.tip) == self.tip),
            (
                "total_after_tip equals total_before_tip + tip",
                self.total_after_tip == self.total_before_tip + self.tip,
            ),
            (
                "sum of totals equals total_after_tip",
                sum(|p| p.total) == self.total_after_tip,
            ),
            (
                "participant amounts are internally consistent",
                self.participants.iter().all(|p| {
                    p.pre_tip == p.items + p.adjustment
                        && p.total == p.pre_tip + p.tip
                        && p.item_shares.iter().map(|(_, s)| s).sum::<i64>() == p.items
                }),
            ),
        ];

        match checks.iter().find(|(_, holds)| !holds) {
            Some((rule, _)) => Err(SplitError::InvariantViolation((*rule).to_string())),
            None => Ok(()),
        }
    }
}

/// Renders a minor-unit allocation as the wire response.
fn render(bill: &ValidatedBill, allocation: &Allocation) -> SplitResponse {
    let participants = bill
        .participants
        .iter()
        .zip(&allocation.participants)
        .map(|(participant, alloc)| ParticipantShare {
            id: participant.id.clone(),
            name: participant.name.clone(),
            items: bill.format(alloc.items),
            adjustment: bill.format(alloc.adjustment),
            pre_tip: bill.format(alloc.pre_tip),
            tip: bill.format(alloc.tip),
            total: bill.format(alloc.total),
            item_shares: alloc
                .item_shares
                .iter()
                .map(|(item_idx, share)| {
                    let item = &bill.items[*item_idx];
                    ItemShare {
                        item_id: item.id.clone(),
                        item_name: item.name.clone(),
                        amount: bill.format(*share),
                    }
                })
                .collect(),
        })
        .collect();

    SplitResponse {
        currency: bill.currency,
        subtotal: bill.format(allocation.subtotal),
        total_before_tip: bill.format(allocation.total_before_tip),
        adjustment: bill.format(allocation.adjustment),
        tip: bill.format(allocation.tip),
        total_after_tip: bill.format(allocation.total_after_tip),
        participants,
    }
}
