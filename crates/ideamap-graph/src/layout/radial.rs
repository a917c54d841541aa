use super::Layouter;
use crate::hierarchy::Hierarchy;
use ideamap_core::{LayoutError, Link, Node, Position, PositionMap};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Concentric layout: every level sits on a ring of radius
/// `level * radius_step` around the viewport center, evenly spaced by angle.
///
/// Levels are shared across the whole forest, so the first-level children of
/// separate roots split the same ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialLayouter {
    pub radius_step: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for RadialLayouter {
    fn default() -> Self {
        Self {
            radius_step: Self::DEFAULT_RADIUS_STEP,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

impl RadialLayouter {
    pub const DEFAULT_RADIUS_STEP: f64 = 150.0;
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 600.0;

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Layouter for RadialLayouter {
    fn execute(&self, nodes: &[Node], links: &[Link]) -> Result<PositionMap, LayoutError> {
        let mut working = nodes.to_vec();
        let hierarchy = Hierarchy::build(&mut working, links)?;
        let center = self.center();

        let groups = hierarchy.level_groups();
        let mut positions = PositionMap::with_capacity(working.len());
        for (level, group) in groups.iter().enumerate() {
            let radius = level as f64 * self.radius_step;
            let angle_step = TAU / group.len().max(1) as f64;
            for (i, &idx) in group.iter().enumerate() {
                let angle = i as f64 * angle_step;
                positions.insert(
                    working[idx].id.clone(),
                    Position::new(
                        center.x + angle.cos() * radius,
                        center.y + angle.sin() * radius,
                    ),
                );
            }
        }

        tracing::debug!(
            "Radial layout placed {} nodes on {} rings",
            positions.len(),
            groups.len()
        );

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideamap_core::NodeId;
    use proptest::prelude::*;

    fn pos(positions: &PositionMap, id: &str) -> Position {
        positions[&NodeId::from(id)]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_root_at_center_and_children_on_first_ring() {
        let nodes = ["root", "a", "b", "c", "d"].into_iter().map(Node::new).collect::<Vec<_>>();
        let links = vec![
            Link::new("root", "a"),
            Link::new("root", "b"),
            Link::new("root", "c"),
            Link::new("root", "d"),
        ];

        let positions = RadialLayouter::default().execute(&nodes, &links).unwrap();

        assert_eq!(pos(&positions, "root"), Position::new(400.0, 300.0));
        let a = pos(&positions, "a");
        assert!(approx(a.x, 550.0) && approx(a.y, 300.0));
        let b = pos(&positions, "b");
        assert!(approx(b.x, 400.0) && approx(b.y, 450.0));
        let c = pos(&positions, "c");
        assert!(approx(c.x, 250.0) && approx(c.y, 300.0));
        let d = pos(&positions, "d");
        assert!(approx(d.x, 400.0) && approx(d.y, 150.0));
    }

    #[test]
    fn test_second_level_uses_double_radius() {
        let nodes = ["r", "a", "b"].into_iter().map(Node::new).collect::<Vec<_>>();
        let links = vec![Link::new("r", "a"), Link::new("a", "b")];
        let layouter = RadialLayouter {
            radius_step: 50.0,
            width: 200.0,
            height: 200.0,
        };

        let positions = layouter.execute(&nodes, &links).unwrap();

        assert_eq!(pos(&positions, "a"), Position::new(150.0, 100.0));
        assert_eq!(pos(&positions, "b"), Position::new(200.0, 100.0));
    }

    #[test]
    fn test_forest_roots_share_center_and_rings() {
        let nodes = ["r1", "r2", "a", "b"].into_iter().map(Node::new).collect::<Vec<_>>();
        let links = vec![Link::new("r1", "a"), Link::new("r2", "b")];

        let positions = RadialLayouter::default().execute(&nodes, &links).unwrap();

        assert_eq!(pos(&positions, "r1"), Position::new(400.0, 300.0));
        assert_eq!(pos(&positions, "r2"), Position::new(400.0, 300.0));
        let a = pos(&positions, "a");
        let b = pos(&positions, "b");
        assert!(approx(a.x, 550.0) && approx(a.y, 300.0));
        assert!(approx(b.x, 250.0) && approx(b.y, 300.0));
    }

    #[test]
    fn test_cycle_detected() {
        let nodes = vec![Node::new("a"), Node::new("b"), Node::new("c")];
        let links = vec![Link::new("b", "c"), Link::new("c", "b")];

        let result = RadialLayouter::default().execute(&nodes, &links);

        assert_eq!(
            result.unwrap_err(),
            LayoutError::CyclicHierarchy {
                node: NodeId::from("b")
            }
        );
    }

    fn forest_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Link>)> {
        proptest::collection::vec(proptest::option::of(any::<prop::sample::Index>()), 1..40)
            .prop_map(|parents| {
                let nodes: Vec<Node> = (0..parents.len())
                    .map(|i| Node::new(format!("n{i}")))
                    .collect();
                let links = parents
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter_map(|(i, parent)| {
                        parent
                            .as_ref()
                            .map(|p| Link::new(format!("n{}", p.index(i)), format!("n{i}")))
                    })
                    .collect();
                (nodes, links)
            })
    }

    proptest! {
        /// Roots land on the center and every other node on the ring for its level.
        #[test]
        fn prop_nodes_on_level_rings(
            (nodes, links) in forest_strategy(),
            radius_step in 10.0f64..300.0,
        ) {
            let layouter = RadialLayouter { radius_step, ..RadialLayouter::default() };
            let positions = layouter.execute(&nodes, &links).unwrap();
            let center = layouter.center();

            let mut working = nodes.clone();
            let hierarchy = Hierarchy::build(&mut working, &links).unwrap();

            prop_assert_eq!(positions.len(), nodes.len());
            for (idx, node) in working.iter().enumerate() {
                let p = positions[&node.id];
                let level = hierarchy.level(idx);
                if level == 0 {
                    prop_assert_eq!(p, center);
                } else {
                    let expected = level as f64 * radius_step;
                    prop_assert!((p.distance(center) - expected).abs() < 1e-6);
                }
            }
        }

        /// Identical input gives identical output.
        #[test]
        fn prop_radial_layout_deterministic((nodes, links) in forest_strategy()) {
            let layouter = RadialLayouter::default();
            prop_assert_eq!(
                layouter.execute(&nodes, &links).unwrap(),
                layouter.execute(&nodes, &links).unwrap()
            );
        }
    }
}
