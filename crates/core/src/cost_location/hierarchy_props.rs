//! Property-based tests for cost-location containment.
//!
//! Feature: cost-location-hierarchy
//! - Property 3: Item containment matches the group range
//! - Property 4: Classification returns only enclosing groups

use proptest::prelude::*;

use super::hierarchy::CostLocationHierarchy;
use super::types::CostLocationNode;

/// Strategy for a group prefix of one to three digits.
fn prefix() -> impl Strategy<Value = String> {
    (1u64..1000).prop_map(|n| n.to_string())
}

/// Strategy for a four-digit item number.
fn item_number() -> impl Strategy<Value = u64> {
    1000u64..10_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 3: Item containment matches the group range
    /// I ∈ G.children ⟺ G.min ≤ I.number ≤ G.max.
    #[test]
    fn prop_item_in_children_iff_in_range(
        group_prefix in prefix(),
        numbers in prop::collection::btree_set(item_number(), 1..20),
    ) {
        let group = CostLocationNode::group(&group_prefix, "G", 4).unwrap();
        let (min, max) = group.range();
        let mut nodes = vec![group.clone()];
        nodes.extend(numbers.iter().map(|n| CostLocationNode::item(&n.to_string(), "I").unwrap()));

        let hierarchy = CostLocationHierarchy::build(nodes);
        let built = hierarchy.get(&group.id).unwrap();

        for number in &numbers {
            let id = saldo_shared::types::CostLocationId::new(number.to_string());
            prop_assert_eq!(
                built.children.contains(&id),
                min <= *number && *number <= max
            );
        }
    }

    /// Property 4: Classification returns only enclosing groups
    #[test]
    fn prop_classify_groups_enclose_number(
        prefixes in prop::collection::btree_set(prefix(), 1..10),
        number in item_number(),
    ) {
        let nodes: Vec<CostLocationNode> = prefixes
            .iter()
            .map(|p| CostLocationNode::group(p, "G", 4).unwrap())
            .collect();
        let expected = nodes
            .iter()
            .filter(|g| {
                let (min, max) = g.range();
                min <= number && number <= max
            })
            .count();

        let hierarchy = CostLocationHierarchy::build(nodes);
        match hierarchy.classify(number) {
            Some(found) => {
                prop_assert!(found.item.is_none());
                prop_assert_eq!(found.groups.len(), expected);
                for pair in found.groups.windows(2) {
                    let (a_min, a_max) = pair[0].range();
                    let (b_min, b_max) = pair[1].range();
                    prop_assert!(a_max - a_min <= b_max - b_min);
                }
            }
            None => prop_assert_eq!(expected, 0),
        }
    }
}
