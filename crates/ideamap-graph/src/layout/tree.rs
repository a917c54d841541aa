use super::Layouter;
use crate::hierarchy::Hierarchy;
use ideamap_core::{LayoutDirection, LayoutError, Link, Node, Position, PositionMap};
use serde::{Deserialize, Serialize};

/// Tidy-tree style layout: leaves take consecutive slots, each level is offset
/// by a fixed spacing and parents are centered over their children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayouter {
    /// Distance between consecutive levels
    pub horizontal_spacing: f64,
    /// Distance between consecutive leaf slots
    pub vertical_spacing: f64,
    /// Axis along which depth grows
    pub direction: LayoutDirection,
}

impl Default for TreeLayouter {
    fn default() -> Self {
        Self {
            horizontal_spacing: Self::DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: Self::DEFAULT_VERTICAL_SPACING,
            direction: LayoutDirection::Horizontal,
        }
    }
}

/// Next free leaf slot, shared by every tree of the forest.
#[derive(Debug, Default)]
struct LeafCursor {
    next: usize,
}

impl LeafCursor {
    fn take(&mut self) -> usize {
        let slot = self.next;
        self.next += 1;
        slot
    }
}

impl TreeLayouter {
    pub const DEFAULT_HORIZONTAL_SPACING: f64 = 200.0;
    pub const DEFAULT_VERTICAL_SPACING: f64 = 100.0;

    /// (level spacing, leaf spacing) for the configured direction.
    fn steps(&self) -> (f64, f64) {
        match self.direction {
            LayoutDirection::Horizontal => (self.horizontal_spacing, self.vertical_spacing),
            LayoutDirection::Vertical => (self.vertical_spacing, self.horizontal_spacing),
        }
    }

    /// Post-order placement. Returns the node's coordinate along the leaf axis.
    fn place_subtree(
        &self,
        hierarchy: &Hierarchy,
        idx: usize,
        cursor: &mut LeafCursor,
        slots: &mut [(f64, f64)],
    ) -> f64 {
        let (level_step, leaf_step) = self.steps();
        let children = hierarchy.children(idx);

        let across = if children.is_empty() {
            cursor.take() as f64 * leaf_step
        } else {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &child in children {
                let child_across = self.place_subtree(hierarchy, child, cursor, slots);
                min = min.min(child_across);
                max = max.max(child_across);
            }
            (min + max) / 2.0
        };

        slots[idx] = (hierarchy.level(idx) as f64 * level_step, across);
        across
    }
}

impl Layouter for TreeLayouter {
    fn execute(&self, nodes: &[Node], links: &[Link]) -> Result<PositionMap, LayoutError> {
        let mut working = nodes.to_vec();
        let hierarchy = Hierarchy::build(&mut working, links)?;

        let mut slots = vec![(0.0, 0.0); working.len()];
        let mut cursor = LeafCursor::default();
        for &root in hierarchy.roots() {
            self.place_subtree(&hierarchy, root, &mut cursor, &mut slots);
        }

        tracing::debug!(
            "Tree layout placed {} nodes in {} leaf slots",
            working.len(),
            cursor.next
        );

        Ok(working
            .into_iter()
            .zip(slots)
            .map(|(node, (along, across))| {
                let position = match self.direction {
                    LayoutDirection::Horizontal => Position::new(along, across),
                    LayoutDirection::Vertical => Position::new(across, along),
                };
                (node.id, position)
            })
            .collect())
    }
}
