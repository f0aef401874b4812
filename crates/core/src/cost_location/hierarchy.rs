//! Cost-location containment hierarchy.

use std::collections::HashMap;

use tracing::debug;

use saldo_shared::config::TermsConfig;
use saldo_shared::types::{CostLocationId, Record, Table};
use saldo_shared::ReportConfig;

use super::types::{CostLocationNode, Limits, NodeKind, PlanType};
use crate::issue::{Issue, IssueLog};

const DIGIT_COLUMNS: usize = 4;
const GROUP_NAME: &str = "groupName";
const SUB_GROUP_NAME: &str = "subGroupName";
const ITEM_NAME: &str = "name";
const TYPE: &str = "type";
const MAX: &str = "max";
const EXTENDED_MAX: &str = "extendedMax";

/// Result of classifying a cost-location number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLocationMatch<'a> {
    /// The item with exactly this number, if the plan has one.
    pub item: Option<&'a CostLocationNode>,
    /// Every group whose range contains the number, tightest first.
    pub groups: Vec<&'a CostLocationNode>,
}

/// Containment DAG over the cost-location plan.
#[derive(Debug, Clone, Default)]
pub struct CostLocationHierarchy {
    nodes: HashMap<CostLocationId, CostLocationNode>,
    items_by_number: HashMap<u64, CostLocationId>,
}

impl CostLocationHierarchy {
    /// Builds the hierarchy, assigning every enclosed node to every group
    /// that encloses it.
    ///
    /// A later node with an id already seen replaces the earlier one.
    #[must_use]
    pub fn build(nodes: Vec<CostLocationNode>) -> Self {
        let mut nodes: HashMap<CostLocationId, CostLocationNode> = nodes
            .into_iter()
            .map(|mut node| {
                node.children.clear();
                (node.id.clone(), node)
            })
            .collect();

        let mut edges = Vec::new();
        for group in nodes.values().filter(|n| n.is_group()) {
            for candidate in nodes.values() {
                if group.encloses(candidate) {
                    edges.push((group.id.clone(), candidate.id.clone()));
                }
            }
        }
        for (group, child) in edges {
            if let Some(node) = nodes.get_mut(&group) {
                node.children.insert(child);
            }
        }

        let items_by_number = nodes
            .values()
            .filter_map(|node| match node.kind {
                NodeKind::Item { number } => Some((number, node.id.clone())),
                NodeKind::Group { .. } => None,
            })
            .collect();

        Self {
            nodes,
            items_by_number,
        }
    }

    /// Reads the plan table and builds the hierarchy.
    ///
    /// The first four columns hold the digits of a node id. Rows whose second
    /// digit column is empty are section headings and are skipped. A row with
    /// a group or subgroup name is a group, a row with only a name an item.
    pub fn from_table(table: &Table, config: &ReportConfig, issues: &mut IssueLog) -> Self {
        let mut nodes = Vec::new();
        for record in table.records() {
            if record.at(1).is_empty() {
                continue;
            }
            let Some(digits) = Self::digits(&record) else {
                issues.record(Issue::InvalidTableRow {
                    table: table.name.clone(),
                    row: record.sheet_row(),
                    message: "cost-location digits must be whole numbers".to_string(),
                });
                continue;
            };

            let group_name = record
                .get(SUB_GROUP_NAME)
                .as_text()
                .or_else(|| record.get(GROUP_NAME).as_text());
            let mut invalid = |message: String| {
                issues.record(Issue::InvalidTableRow {
                    table: table.name.clone(),
                    row: record.sheet_row(),
                    message,
                });
            };
            let node = match group_name {
                Some(name) => CostLocationNode::group(&digits, name, config.cost_location_digits),
                None => match record.get(ITEM_NAME).as_text() {
                    Some(name) => CostLocationNode::item(&digits, name),
                    None => {
                        invalid(format!("cost location '{digits}' has no name"));
                        continue;
                    }
                },
            };
            let Some(mut node) = node else {
                invalid(format!("cost location '{digits}' is out of range"));
                continue;
            };

            node.plan_type = record
                .get(TYPE)
                .as_str()
                .and_then(|value| Self::plan_type(&config.terms, value));
            node.limits = Limits {
                max: record.get(MAX).as_decimal(),
                extended_max: record.get(EXTENDED_MAX).as_decimal(),
            };
            nodes.push(node);
        }

        let hierarchy = Self::build(nodes);
        debug!(nodes = hierarchy.nodes.len(), "cost-location plan loaded");
        hierarchy
    }

    fn digits(record: &Record<'_>) -> Option<String> {
        let mut digits = String::new();
        for column in 0..DIGIT_COLUMNS {
            let cell = record.at(column);
            if cell.is_empty() {
                continue;
            }
            digits.push_str(&cell.as_integer()?.to_string());
        }
        Some(digits)
    }

    fn plan_type(terms: &TermsConfig, value: &str) -> Option<PlanType> {
        if TermsConfig::matches(&terms.plan_income_synonyms, value) {
            Some(PlanType::Income)
        } else if TermsConfig::matches(&terms.plan_expense_synonyms, value) {
            Some(PlanType::Expense)
        } else if TermsConfig::matches(&terms.plan_budget_synonyms, value) {
            Some(PlanType::Budget)
        } else {
            None
        }
    }

    /// Looks a node up by id.
    #[must_use]
    pub fn get(&self, id: &CostLocationId) -> Option<&CostLocationNode> {
        self.nodes.get(id)
    }

    /// Classifies a cost-location number.
    ///
    /// Returns the item with this number (if any) and every enclosing group,
    /// tightest first, or `None` when neither exists.
    #[must_use]
    pub fn classify(&self, number: u64) -> Option<CostLocationMatch<'_>> {
        let item = self
            .items_by_number
            .get(&number)
            .and_then(|id| self.nodes.get(id));

        let mut groups: Vec<&CostLocationNode> = self
            .nodes
            .values()
            .filter(|node| {
                let (min, max) = node.range();
                node.is_group() && min <= number && number <= max
            })
            .collect();
        groups.sort_by(|a, b| {
            let (a_min, a_max) = a.range();
            let (b_min, b_max) = b.range();
            (a_max - a_min, &a.id).cmp(&(b_max - b_min, &b.id))
        });

        if item.is_none() && groups.is_empty() {
            None
        } else {
            Some(CostLocationMatch { item, groups })
        }
    }

    /// Iterates over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &CostLocationNode> {
        let mut nodes: Vec<&CostLocationNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes.into_iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the plan is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
