//! Cost-location plan node types.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::CostLocationId;

/// Budget type a plan row declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Income cost location.
    Income,
    /// Expense cost location.
    Expense,
    /// Budget-only cost location.
    Budget,
}

/// Shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A prefix covering `min..=max`.
    Group {
        /// Prefix padded with zeros.
        min: u64,
        /// Prefix padded with nines.
        max: u64,
    },
    /// A single cost location.
    Item {
        /// Full cost-location number.
        number: u64,
    },
}

/// Optional limit columns of a plan row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Regular limit (`max`).
    pub max: Option<Decimal>,
    /// Extended limit (`extendedMax`).
    pub extended_max: Option<Decimal>,
}

/// One node of the cost-location plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLocationNode {
    /// Digit-string id.
    pub id: CostLocationId,
    /// Group range or item number.
    pub kind: NodeKind,
    /// Display name.
    pub name: String,
    /// Declared type, if any.
    pub plan_type: Option<PlanType>,
    /// Limits, if any.
    pub limits: Limits,
    /// Ids of every node this group encloses. Always empty for items.
    pub children: BTreeSet<CostLocationId>,
}

impl CostLocationNode {
    /// Creates a group from its digit prefix, padding to `digits`.
    ///
    /// Returns `None` if `prefix` is not purely numeric.
    #[must_use]
    pub fn group(prefix: &str, name: impl Into<String>, digits: usize) -> Option<Self> {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let fill = digits.saturating_sub(prefix.len());
        let min = format!("{prefix}{}", "0".repeat(fill)).parse().ok()?;
        let max = format!("{prefix}{}", "9".repeat(fill)).parse().ok()?;
        Some(Self::with_kind(prefix, NodeKind::Group { min, max }, name))
    }

    /// Creates an item from its full digit string.
    ///
    /// Returns `None` if `digits` is not purely numeric.
    #[must_use]
    pub fn item(digits: &str, name: impl Into<String>) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse().ok()?;
        Some(Self::with_kind(digits, NodeKind::Item { number }, name))
    }

    fn with_kind(id: &str, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: CostLocationId::new(id),
            kind,
            name: name.into(),
            plan_type: None,
            limits: Limits::default(),
            children: BTreeSet::new(),
        }
    }

    /// Returns true for group nodes.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Inclusive numeric range; an item's range is its number.
    #[must_use]
    pub const fn range(&self) -> (u64, u64) {
        match self.kind {
            NodeKind::Group { min, max } => (min, max),
            NodeKind::Item { number } => (number, number),
        }
    }

    /// Returns true if this group encloses `other`.
    ///
    /// Items are enclosed when their number lies within the range; groups
    /// when their range lies within this range and differs from it.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        let NodeKind::Group { min, max } = self.kind else {
            return false;
        };
        match other.kind {
            NodeKind::Item { number } => min <= number && number <= max,
            NodeKind::Group {
                min: other_min,
                max: other_max,
            } => {
                self.id != other.id
                    && min <= other_min
                    && other_max <= max
                    && (min, max) != (other_min, other_max)
            }
        }
    }
}
