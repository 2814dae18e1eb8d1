//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ExpenseId` where a
//! `ParticipantId` is expected. Identifiers are opaque strings assigned by the
//! document store, so ordering is plain lexicographic ordering on the string.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

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

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(AppError::Validation(format!(
                        "{} cannot be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

typed_id!(ParticipantId, "Unique identifier for a trip participant.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
