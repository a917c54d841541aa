use ideamap_core::{Link, Node};

/// Balanced tree with `count` nodes where node `i` hangs off node `(i - 1) / branching`.
pub fn synthetic_tree(count: usize, branching: usize) -> (Vec<Node>, Vec<Link>) {
    let branching = branching.max(1);
    let nodes = (0..count).map(|i| Node::new(format!("feature_{}", i))).collect();
    let links = (1..count)
        .map(|i| {
            Link::new(
                format!("feature_{}", (i - 1) / branching),
                format!("feature_{}", i),
            )
        })
        .collect();
    (nodes, links)
}
