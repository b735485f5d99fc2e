//! Request validation.
//!
//! Turns a wire-level [`SplitRequest`] into an immutable [`ValidatedBill`]
//! with every amount in minor units. Nothing is allocated until this
//! succeeds.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

use billsplit_shared::types::{Currency, Money};
use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::{ResolvedItem, SplitRequest, TipMode, TipRule, ValidatedBill};

/// Maximum length of participant and item names, in characters.
pub const MAX_NAME_LEN: usize = 128;

/// Tip percentages must stay below this value.
const MAX_TIP_PERCENT: i64 = 10_000;

/// Decimal places allowed in a tip percentage.
const TIP_PERCENT_DECIMALS: u32 = 2;

/// Validates a split request and resolves it into minor units.
///
/// `default_currency` applies when the request omits `currency`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking currency,
/// participants, items, the declared total and the tip in that order.
pub fn validate_request(
    request: &SplitRequest,
    default_currency: Currency,
) -> Result<ValidatedBill, ValidationError> {
    let currency = resolve_currency(request.currency.as_deref(), default_currency)?;
    let index_by_id = validate_participants(request)?;
    let items = validate_items(request, &index_by_id, currency)?;

    let subtotal = items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.amount))
        .ok_or_else(|| ValidationError::AmountOverflow {
            field: "items".to_string(),
        })?;

    let declared_total = request
        .total_before_tip
        .as_deref()
        .map(|value| parse_non_negative(value, "total_before_tip", currency))
        .transpose()?;

    let tip = match request.tip_mode {
        TipMode::Percent => {
            let value = request
                .tip_percent
                .as_deref()
                .ok_or(ValidationError::MissingTipPercent)?;
            TipRule::Percent(parse_tip_percent(value)?)
        }
        TipMode::Fixed => {
            let value = request
                .tip_fixed
                .as_deref()
                .ok_or(ValidationError::MissingTipFixed)?;
            TipRule::Fixed(parse_non_negative(value, "tip_fixed", currency)?)
        }
    };

    Ok(ValidatedBill {
        currency,
        participants: request.participants.clone(),
        items,
        subtotal,
        declared_total,
        tip,
    })
}

fn resolve_currency(
    code: Option<&str>,
    default_currency: Currency,
) -> Result<Currency, ValidationError> {
    match code {
        None => Ok(default_currency),
        Some(code) => {
            Currency::from_str(code).map_err(|_| ValidationError::UnsupportedCurrency(code.into()))
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_NAME_LEN
}

/// Checks participants and returns each ID's position in request order.
fn validate_participants(
    request: &SplitRequest,
) -> Result<HashMap<&str, usize>, ValidationError> {
    if request.participants.is_empty() {
        return Err(ValidationError::NoParticipants);
    }

    let mut index_by_id = HashMap::with_capacity(request.participants.len());
    for (idx, participant) in request.participants.iter().enumerate() {
        if participant.id.is_malformed() {
            return Err(ValidationError::InvalidParticipantId(idx));
        }
        if !is_valid_name(&participant.name) {
            return Err(ValidationError::InvalidParticipantName(
                participant.id.clone(),
            ));
        }
        if index_by_id.insert(participant.id.as_str(), idx).is_some() {
            return Err(ValidationError::DuplicateParticipant(
                participant.id.clone(),
            ));
        }
    }

    Ok(index_by_id)
}

fn validate_items(
    request: &SplitRequest,
    index_by_id: &HashMap<&str, usize>,
    currency: Currency,
) -> Result<Vec<ResolvedItem>, ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let everyone: Vec<usize> = (0..request.participants.len()).collect();
    let mut seen = HashSet::with_capacity(request.items.len());
    let mut items = Vec::with_capacity(request.items.len());

    for (idx, item) in request.items.iter().enumerate() {
        if item.id.is_malformed() {
            return Err(ValidationError::InvalidItemId(idx));
        }
        if !is_valid_name(&item.name) {
            return Err(ValidationError::InvalidItemName(item.id.clone()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateItem(item.id.clone()));
        }

        let amount = parse_non_negative(&item.amount, &format!("items[{idx}].amount"), currency)?;

        // The set is ordered by request position, not by listing order
        let mut resolved = BTreeSet::new();
        for participant_id in item.participants.iter().flatten() {
            let position = index_by_id.get(participant_id.as_str()).ok_or_else(|| {
                ValidationError::UnknownParticipant {
                    item_id: item.id.clone(),
                    participant_id: participant_id.clone(),
                }
            })?;
            resolved.insert(*position);
        }

        let participants = if resolved.is_empty() {
            everyone.clone()
        } else {
            resolved.into_iter().collect()
        };

        items.push(ResolvedItem {
            id: item.id.clone(),
            name: item.name.clone(),
            amount,
            participants,
        });
    }

    Ok(items)
}

/// Parses a money field into minor units, rejecting negative values.
fn parse_non_negative(value: &str, field: &str, currency: Currency) -> Result<i64, ValidationError> {
    let money = Money::parse(value, currency).map_err(|source| ValidationError::InvalidAmount {
        field: field.to_string(),
        source,
    })?;
    if money.is_negative() {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }
    Ok(money.minor)
}

fn parse_tip_percent(value: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidTipPercent(value.to_string());

    let percent = Decimal::from_str_exact(value.trim()).map_err(|_| invalid())?;
    if percent.is_sign_negative() && !percent.is_zero() {
        return Err(invalid());
    }
    if percent.round_dp(TIP_PERCENT_DECIMALS) != percent {
        return Err(invalid());
    }
    if percent >= Decimal::from(MAX_TIP_PERCENT) {
        return Err(invalid());
    }
    Ok(percent)
}
