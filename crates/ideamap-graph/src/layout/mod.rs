use ideamap_core::{LayoutError, Link, Node, PositionMap};

pub mod force;
pub mod radial;
pub mod tree;

pub use force::{ForceLayouter, ForceSimulation};
pub use radial::RadialLayouter;
pub use tree::TreeLayouter;

/// A layout algorithm.
///
/// Implementations work on their own copy of `nodes` and return a position for
/// every input node. Writing the result back is left to the caller.
pub trait Layouter {
    fn execute(&self, nodes: &[Node], links: &[Link]) -> Result<PositionMap, LayoutError>;
}
