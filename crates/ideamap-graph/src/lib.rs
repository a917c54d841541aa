pub mod animation;
pub mod hierarchy;
pub mod layout;
pub mod orchestrator;
pub mod settings;

pub use animation::{
    AnimationHandle, AnimationProgress, AnimationSettings, AnimationState, Animator,
    apply_positions, ease_in_out,
};
pub use hierarchy::Hierarchy;
pub use layout::{ForceLayouter, ForceSimulation, Layouter, RadialLayouter, TreeLayouter};
pub use orchestrator::{LayoutOrchestrator, LayoutOutcome};
pub use settings::LayoutSettings;
