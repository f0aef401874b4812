//! Typed string identifiers.
//!
//! Report plans, time slots and cost-location plan nodes are all keyed by
//! short spreadsheet strings. Wrapping them prevents passing a slot id where a
//! report id is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed string-id wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from anything string-like, trimming whitespace.
            #[must_use]
            pub fn new(value: impl AsRef<str>) -> Self {
                Self(value.as_ref().trim().to_string())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

typed_id!(ReportId, "Identifier of a report plan (the `Plan` column).");
typed_id!(TimeSlotId, "Identifier of a time-slot template (the `Slot ID` column).");
typed_id!(
    CostLocationId,
    "Digit-string identifier of a cost-location plan node."
);
