//! Per-cost-location summaries.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use saldo_shared::config::TermsConfig;
use saldo_shared::types::{CostLocationCode, CostLocationId};

use super::enrich::ClassifiedBooking;
use super::totals::LedgerTotals;
use crate::cost_location::{CostLocationHierarchy, Limits, PlanType};
use crate::issue::{Issue, IssueLog};

/// Bookings of one cost location with what the plan knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLocationSummary {
    /// Normalized code; `None` collects bookings without a cost location.
    pub code: Option<CostLocationCode>,
    /// Plan name of the matching item.
    pub name: Option<String>,
    /// Plan type of the matching item.
    pub plan_type: Option<PlanType>,
    /// Plan limits of the matching item.
    pub limits: Option<Limits>,
    /// Ids of every plan group enclosing the code, tightest first.
    pub groups: Vec<CostLocationId>,
    /// Typed totals of the bookings.
    pub totals: LedgerTotals,
    /// Number of bookings.
    pub bookings: usize,
}

/// Summarizes bookings per cost location, ordered by code, with the bucket
/// of bookings without a cost location last.
///
/// A code the plan does not know is reported once.
pub fn summarize_cost_locations(
    bookings: &[ClassifiedBooking],
    hierarchy: &CostLocationHierarchy,
    terms: &TermsConfig,
    issues: &mut IssueLog,
) -> Vec<CostLocationSummary> {
    let mut buckets: BTreeMap<CostLocationCode, Vec<&ClassifiedBooking>> = BTreeMap::new();
    let mut without = Vec::new();
    for booking in bookings {
        match booking.cost_location() {
            Some(code) => buckets.entry(code.clone()).or_default().push(booking),
            None => without.push(booking),
        }
    }

    let mut unknown = BTreeSet::new();
    let mut summaries: Vec<CostLocationSummary> = buckets
        .into_iter()
        .map(|(code, members)| {
            let found = code.number().and_then(|n| hierarchy.classify(n));
            if found.is_none() {
                unknown.insert(code.clone());
            }
            let item = found.as_ref().and_then(|f| f.item);
            CostLocationSummary {
                name: item.map(|i| i.name.clone()),
                plan_type: item.and_then(|i| i.plan_type),
                limits: item.map(|i| i.limits),
                groups: found
                    .as_ref()
                    .map(|f| f.groups.iter().map(|g| g.id.clone()).collect())
                    .unwrap_or_default(),
                totals: LedgerTotals::from_bookings(members.iter().copied(), terms),
                bookings: members.len(),
                code: Some(code),
            }
        })
        .collect();

    for code in unknown {
        issues.record(Issue::UnknownCostLocation { code });
    }

    if !without.is_empty() {
        summaries.push(CostLocationSummary {
            code: None,
            name: None,
            plan_type: None,
            limits: None,
            groups: Vec::new(),
            totals: LedgerTotals::from_bookings(without.iter().copied(), terms),
            bookings: without.len(),
        });
    }
    summaries
}
