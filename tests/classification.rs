//! Property tests for the tier classifier over arbitrary territory graphs.

use proptest::prelude::*;

use frontline::classify::{audit, classify, Anomaly, PermanentFrontlines};
use frontline::map::{FactionId, GraphBuilder, Territory, TerritoryGraph, TerritoryId, Tier};

/// Node factions (0 = unclaimed) and raw edge endpoints.
type GraphShape = (Vec<u32>, Vec<(usize, usize)>);

fn arb_shape() -> impl Strategy<Value = GraphShape> {
    (1usize..30).prop_flat_map(|n| {
        (
            prop::collection::vec(0u32..4, n),
            prop::collection::vec((0..n, 0..n), 0..n * 2),
        )
    })
}

fn arb_permanent() -> impl Strategy<Value = Vec<(usize, u32)>> {
    prop::collection::vec((0usize..30, 0u32..4), 0..6)
}

fn build(shape: &GraphShape, reversed: bool) -> TerritoryGraph {
    let (factions, edges) = shape;
    let mut order: Vec<usize> = (0..factions.len()).collect();
    if reversed {
        order.reverse();
    }
    let mut b = GraphBuilder::new();
    for i in order {
        b.add_territory(Territory::new(
            TerritoryId(i as u32 + 1),
            format!("N{i}"),
            FactionId(factions[i]),
        ))
        .unwrap();
    }
    for &(x, y) in edges {
        if x != y {
            b.connect(TerritoryId(x as u32 + 1), TerritoryId(y as u32 + 1)).unwrap();
        }
    }
    b.build()
}

fn permanent_list(entries: &[(usize, u32)], n: usize) -> PermanentFrontlines {
    let mut list = PermanentFrontlines::new();
    for &(i, f) in entries {
        list.insert(FactionId(f), format!("N{}", i % n));
    }
    list
}

fn tiers_by_name(g: &TerritoryGraph) -> Vec<(String, Tier)> {
    let mut v: Vec<(String, Tier)> = g
        .territories()
        .iter()
        .map(|t| (t.name.clone(), t.tier()))
        .collect();
    v.sort();
    v
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn classification_is_idempotent(shape in arb_shape(), perm in arb_permanent()) {
        let mut g = build(&shape, false);
        let list = permanent_list(&perm, shape.0.len());
        let first = classify(&mut g, &list);
        let tiers = tiers_by_name(&g);
        let second = classify(&mut g, &list);
        prop_assert_eq!(first, second);
        prop_assert_eq!(tiers, tiers_by_name(&g));
    }

    #[test]
    fn insertion_order_does_not_matter(shape in arb_shape(), perm in arb_permanent()) {
        let list = permanent_list(&perm, shape.0.len());
        let mut forward = build(&shape, false);
        let mut backward = build(&shape, true);
        classify(&mut forward, &list);
        classify(&mut backward, &list);
        prop_assert_eq!(tiers_by_name(&forward), tiers_by_name(&backward));
    }

    #[test]
    fn enemy_borders_are_frontline_on_both_sides(shape in arb_shape()) {
        let mut g = build(&shape, false);
        classify(&mut g, &PermanentFrontlines::new());
        for (a, b) in g.edges() {
            let (ta, tb) = (g.territory(a), g.territory(b));
            if ta.controlling_faction.is_enemy_of(tb.controlling_faction) {
                prop_assert_eq!(ta.tier(), Tier::Frontline);
                prop_assert_eq!(tb.tier(), Tier::Frontline);
            }
        }
    }

    #[test]
    fn command_ops_sit_behind_a_friendly_frontline(shape in arb_shape(), perm in arb_permanent()) {
        let mut g = build(&shape, false);
        classify(&mut g, &permanent_list(&perm, shape.0.len()));
        for (idx, t) in g.iter() {
            if t.tier() != Tier::CommandOperations {
                continue;
            }
            prop_assert!(t.is_claimed());
            let backed = g.neighbors(idx).iter().any(|&j| {
                let nb = g.territory(j);
                nb.tier() == Tier::Frontline && nb.controlling_faction == t.controlling_faction
            });
            prop_assert!(backed, "{} has no friendly frontline neighbor", t.name);
        }
    }

    #[test]
    fn permanent_entries_held_by_their_faction_are_frontline(
        shape in arb_shape(),
        perm in arb_permanent(),
    ) {
        let mut g = build(&shape, false);
        let list = permanent_list(&perm, shape.0.len());
        classify(&mut g, &list);
        for t in g.territories() {
            if t.is_claimed() && list.contains(&t.name, t.controlling_faction) {
                prop_assert_eq!(t.tier(), Tier::Frontline);
                prop_assert!(t.is_permanent_frontline());
            }
        }
    }

    #[test]
    fn unclaimed_and_isolated_nodes_stay_rearguard(shape in arb_shape()) {
        let mut g = build(&shape, false);
        classify(&mut g, &PermanentFrontlines::new());
        for (idx, t) in g.iter() {
            if !t.is_claimed() || g.neighbors(idx).is_empty() {
                prop_assert_eq!(t.tier(), Tier::Rearguard);
            }
        }
    }

    #[test]
    fn audit_finds_no_unmarked_frontlines(shape in arb_shape(), perm in arb_permanent()) {
        let mut g = build(&shape, false);
        let list = permanent_list(&perm, shape.0.len());
        classify(&mut g, &list);
        let anomalies = audit(&g, &list);
        prop_assert!(anomalies.iter().all(Anomaly::is_informational));
    }

    #[test]
    fn adjacency_stays_symmetric(shape in arb_shape()) {
        let g = build(&shape, false);
        for (idx, _) in g.iter() {
            for &j in g.neighbors(idx) {
                prop_assert!(j != idx);
                prop_assert!(g.neighbors(j).contains(&idx));
            }
        }
    }
}
