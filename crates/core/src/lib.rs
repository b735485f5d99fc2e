//! Core split logic for Billsplit.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Every amount is an integer count of minor units; decimals only appear
//! at the parse and format boundary.
//!
//! # Modules
//!
//! - `currency` - Largest-remainder apportionment and percentage rounding
//! - `split` - Request validation and the split engine

pub mod currency;
pub mod split;
