//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ItemId` where a
//! `ParticipantId` is expected. IDs are caller-chosen strings scoped to a
//! single bill.

use serde::{Deserialize, Serialize};

/// Maximum length of any ID, in characters.
pub const MAX_ID_LEN: usize = 64;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates an ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the ID is blank or longer than [`MAX_ID_LEN`] characters.
            #[must_use]
            pub fn is_malformed(&self) -> bool {
                self.0.trim().is_empty() || self.0.chars().count() > MAX_ID_LEN
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

typed_id!(ParticipantId, "Identifier of a participant within one bill.");
typed_id!(ItemId, "Identifier of a line item within one bill.");
