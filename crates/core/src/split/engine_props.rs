//! Property-based tests for the split engine.
//!
//! - Every stage conserves its total exactly
//! - Shares stay non-negative when the declared total covers the items
//! - No adjustment without a declared total
//! - Results are deterministic
//! - Bill-level totals do not depend on participant order
//! - Participant totals do not depend on item order

use billsplit_shared::types::{Currency, ItemId, Money, ParticipantId};
use proptest::prelude::*;

use super::engine::SplitEngine;
use super::types::{Allocation, ItemInput, ParticipantInput, SplitRequest, TipMode};
use super::validation::validate_request;

/// Generated bill: participant count, items as `(amount, membership mask)`,
/// optional declared total and tip.
#[derive(Debug, Clone)]
struct Bill {
    participants: usize,
    items: Vec<(i64, u8)>,
    declared: Option<i64>,
    tip_mode: TipMode,
    tip_percent_bp: i64,
    tip_fixed: i64,
}

fn bill() -> impl Strategy<Value = Bill> {
    (
        1usize..=6,
        prop::collection::vec((0i64..10_000_000, any::<u8>()), 1..8),
        prop::option::of(0i64..100_000_000),
        prop_oneof![Just(TipMode::Percent), Just(TipMode::Fixed)],
        0i64..5_000,
        0i64..1_000_000,
    )
        .prop_map(
            |(participants, items, declared, tip_mode, tip_percent_bp, tip_fixed)| Bill {
                participants,
                items,
                declared,
                tip_mode,
                tip_percent_bp,
                tip_fixed,
            },
        )
}

fn usd(minor: i64) -> String {
    Money::from_minor(minor, Currency::Usd).to_string()
}

fn to_request(bill: &Bill) -> SplitRequest {
    let ids: Vec<ParticipantId> = (0..bill.participants)
        .map(|i| ParticipantId::new(format!("p{i}")))
        .collect();

    SplitRequest {
        currency: Some("USD".to_string()),
        participants: ids
            .iter()
            .map(|id| ParticipantInput {
                id: id.clone(),
                name: format!("Person {id}"),
            })
            .collect(),
        items: bill
            .items
            .iter()
            .enumerate()
            .map(|(idx, (amount, mask))| ItemInput {
                id: ItemId::new(format!("item{idx}")),
                name: format!("Item {idx}"),
                amount: usd(*amount),
                participants: Some(
                    ids.iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, id)| id.clone())
                        .collect(),
                ),
            })
            .collect(),
        total_before_tip: bill.declared.map(usd),
        tip_mode: bill.tip_mode,
        tip_percent: Some(format!("{}.{:02}", bill.tip_percent_bp / 100, bill.tip_percent_bp % 100)),
        tip_fixed: Some(usd(bill.tip_fixed)),
    }
}

fn allocate(request: &SplitRequest) -> Allocation {
    let validated = validate_request(request, Currency::Usd).unwrap();
    SplitEngine::allocate(&validated).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* valid bill, every stage SHALL sum exactly to its bill-level amount.
    #[test]
    fn prop_split_conserves_every_stage(bill in bill()) {
        let alloc = allocate(&to_request(&bill));

        prop_assert!(alloc.check_invariants().is_ok());
        prop_assert_eq!(alloc.participants.iter().map(|p| p.items).sum::<i64>(), alloc.subtotal);
        prop_assert_eq!(alloc.participants.iter().map(|p| p.pre_tip).sum::<i64>(), alloc.total_before_tip);
        prop_assert_eq!(alloc.participants.iter().map(|p| p.tip).sum::<i64>(), alloc.tip);
        prop_assert_eq!(alloc.participants.iter().map(|p| p.total).sum::<i64>(), alloc.total_after_tip);
        if let Some(declared) = bill.declared {
            prop_assert_eq!(alloc.total_before_tip, declared);
        }
    }

    /// *For any* bill whose declared total (if any) is at least the item
    /// subtotal, no participant SHALL owe a negative amount at any stage.
    #[test]
    fn prop_shares_non_negative_when_declared_total_covers_items(bill in bill()) {
        let alloc = allocate(&to_request(&bill));
        prop_assume!(alloc.adjustment >= 0);

        for p in &alloc.participants {
            prop_assert!(p.items >= 0);
            prop_assert!(p.adjustment >= 0);
            prop_assert!(p.tip >= 0);
            prop_assert!(p.total >= 0);
        }
    }

    /// Computing the same request twice SHALL give identical responses.
    #[test]
    fn prop_compute_is_deterministic(bill in bill()) {
        let request = to_request(&bill);
        let engine = SplitEngine::default();
        prop_assert_eq!(engine.compute(&request), engine.compute(&request));
    }

    /// Reordering participants SHALL NOT change any bill-level amount.
    #[test]
    fn prop_bill_totals_ignore_participant_order(bill in bill()) {
        let request = to_request(&bill);
        let mut reversed = request.clone();
        reversed.participants.reverse();

        let forward = allocate(&request);
        let backward = allocate(&reversed);
        prop_assert_eq!(forward.subtotal, backward.subtotal);
        prop_assert_eq!(forward.adjustment, backward.adjustment);
        prop_assert_eq!(forward.tip, backward.tip);
        prop_assert_eq!(forward.total_after_tip, backward.total_after_tip);
    }

    /// Without a declared total, every participant's adjustment SHALL be zero.
    #[test]
    fn prop_no_declared_total_means_no_adjustment(mut bill in bill()) {
        bill.declared = None;
        let alloc = allocate(&to_request(&bill));

        prop_assert_eq!(alloc.adjustment, 0);
        for p in &alloc.participants {
            prop_assert_eq!(p.adjustment, 0);
            prop_assert_eq!(p.pre_tip, p.items);
        }
    }

    /// Reordering items SHALL NOT change what any participant owes.
    #[test]
    fn prop_participant_totals_ignore_item_order(bill in bill()) {
        let request = to_request(&bill);
        let mut reversed = request.clone();
        reversed.items.reverse();

        let forward = allocate(&request);
        let backward = allocate(&reversed);
        for (f, b) in forward.participants.iter().zip(&backward.participants) {
            prop_assert_eq!(f.items, b.items);
            prop_assert_eq!(f.pre_tip, b.pre_tip);
            prop_assert_eq!(f.tip, b.tip);
            prop_assert_eq!(f.total, b.total);
        }
    }
}
