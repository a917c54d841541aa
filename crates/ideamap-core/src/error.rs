use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A parent chain loops back on itself. `node` lies on the cycle or below it.
    #[error("cyclic hierarchy detected at node {node}")]
    CyclicHierarchy { node: NodeId },
}
