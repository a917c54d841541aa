use ideamap_core::{LayoutError, Link, Node, NodeId};
use std::collections::{HashMap, VecDeque};

/// Parent/child structure derived from a flat node list and its links.
///
/// Nodes are addressed by their index in the slice the hierarchy was built
/// from. Rebuilt from scratch for every layout call.
#[derive(Debug, Default)]
pub struct Hierarchy {
    index: HashMap<NodeId, usize>,
    children: Vec<Vec<usize>>,
    levels: Vec<usize>,
    roots: Vec<usize>,
}

impl Hierarchy {
    /// Derives the hierarchy and writes each linked node's `parent_id`.
    ///
    /// Links claim parents first, in link order; a node targeted by several
    /// links keeps the first. Nodes not claimed by a link fall back to their
    /// own `parent_id`. Links or parent ids naming unknown nodes are ignored.
    pub fn build(nodes: &mut [Node], links: &[Link]) -> Result<Self, LayoutError> {
        let index = Self::index_nodes(nodes);
        let mut children = vec![Vec::new(); nodes.len()];
        let mut linked = vec![false; nodes.len()];

        for link in links {
            let (Some(&source), Some(&target)) =
                (index.get(&link.source), index.get(&link.target))
            else {
                tracing::debug!(
                    "Ignoring link {} -> {}: endpoint missing from node set",
                    link.source,
                    link.target
                );
                continue;
            };

            if linked[target] {
                tracing::debug!(
                    "Ignoring link {} -> {}: target already has a parent",
                    link.source,
                    link.target
                );
                continue;
            }

            linked[target] = true;
            nodes[target].parent_id = Some(link.source.clone());
            children[source].push(target);
        }

        let mut roots = Vec::new();
        for (idx, node) in nodes.iter().enumerate() {
            if linked[idx] {
                continue;
            }
            let parent = node
                .parent_id
                .as_ref()
                .and_then(|parent_id| index.get(parent_id).copied());
            match parent {
                Some(parent) => children[parent].push(idx),
                None => {
                    if let Some(parent_id) = &node.parent_id {
                        tracing::debug!(
                            "Node {} references unknown parent {}, treating as root",
                            node.id,
                            parent_id
                        );
                    }
                    roots.push(idx);
                }
            }
        }

        let levels = Self::assign_levels(nodes, &children, &roots)?;

        Ok(Self {
            index,
            children,
            levels,
            roots,
        })
    }

    fn index_nodes(nodes: &[Node]) -> HashMap<NodeId, usize> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.contains_key(&node.id) {
                tracing::debug!("Duplicate node id {}, keeping first occurrence", node.id);
                continue;
            }
            index.insert(node.id.clone(), idx);
        }
        index
    }

    /// Every non-root node sits in exactly one child list, so a node the
    /// breadth-first walk never reaches hangs off a parent cycle.
    fn assign_levels(
        nodes: &[Node],
        children: &[Vec<usize>],
        roots: &[usize],
    ) -> Result<Vec<usize>, LayoutError> {
        let mut levels: Vec<Option<usize>> = vec![None; nodes.len()];
        let mut queue = VecDeque::with_capacity(nodes.len());
        for &root in roots {
            levels[root] = Some(0);
            queue.push_back((root, 0));
        }

        while let Some((idx, level)) = queue.pop_front() {
            for &child in &children[idx] {
                if levels[child].is_none() {
                    levels[child] = Some(level + 1);
                    queue.push_back((child, level + 1));
                }
            }
        }

        levels
            .into_iter()
            .enumerate()
            .map(|(idx, level)| {
                level.ok_or_else(|| LayoutError::CyclicHierarchy {
                    node: nodes[idx].id.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    pub fn level(&self, idx: usize) -> usize {
        self.levels[idx]
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Nodes grouped by level. Each root is walked breadth-first in turn and
    /// appends to the shared group for its depth, so separate trees share
    /// groups.
    pub fn level_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut queue = VecDeque::new();

        for &root in &self.roots {
            queue.push_back((root, 0usize));
            while let Some((idx, depth)) = queue.pop_front() {
                if groups.len() <= depth {
                    groups.resize_with(depth + 1, Vec::new);
                }
                groups[depth].push(idx);
                for &child in &self.children[idx] {
                    queue.push_back((child, depth + 1));
                }
            }
        }

        groups
    }
}
