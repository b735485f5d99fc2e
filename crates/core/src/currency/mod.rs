//! Minor-unit arithmetic: apportionment and percentage rounding.

pub mod allocation;
pub mod rounding;

#[cfg(test)]
mod props;

pub use allocation::AllocationUtil;
pub use rounding::percent_of_minor;
