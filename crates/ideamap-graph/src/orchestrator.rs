use crate::animation::{AnimationHandle, AnimationProgress, Animator, apply_positions};
use crate::layout::Layouter;
use crate::settings::LayoutSettings;
use ideamap_core::{LayoutError, LayoutKind, Link, Node, PositionMap};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Positions were written into the nodes immediately.
    Applied,
    /// An animation toward the new positions is running.
    Animating(AnimationHandle),
}

/// Picks a layout by kind, runs it and either snaps or animates the nodes to
/// the result.
#[derive(Debug, Default)]
pub struct LayoutOrchestrator {
    animator: Animator,
}

impl LayoutOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layouter(kind: LayoutKind, settings: &LayoutSettings) -> &dyn Layouter {
        match kind {
            LayoutKind::Tree => &settings.tree,
            LayoutKind::Radial => &settings.radial,
            LayoutKind::Force => &settings.force,
        }
    }

    /// Runs the layout without touching `nodes`.
    pub fn compute(
        kind: LayoutKind,
        nodes: &[Node],
        links: &[Link],
        settings: &LayoutSettings,
    ) -> Result<PositionMap, LayoutError> {
        tracing::debug!(
            "Running {} layout over {} nodes and {} links",
            kind,
            nodes.len(),
            links.len()
        );
        Self::layouter(kind, settings).execute(nodes, links)
    }

    /// Computes the layout and applies it to `nodes`. A failed layout leaves
    /// both the nodes and any running animation alone.
    pub fn run(
        &mut self,
        kind: LayoutKind,
        nodes: &mut [Node],
        links: &[Link],
        settings: &LayoutSettings,
        now: Instant,
    ) -> Result<LayoutOutcome, LayoutError> {
        let positions = Self::compute(kind, nodes, links, settings)?;
        let duration = settings.animation.duration();

        if !settings.animation.animate || duration.is_zero() {
            self.animator.cancel();
            apply_positions(nodes, &positions);
            return Ok(LayoutOutcome::Applied);
        }

        let handle = self.animator.start(nodes, positions, duration, now);
        Ok(LayoutOutcome::Animating(handle))
    }

    /// `run` with the kind given as a tag; unknown tags use the tree layout.
    pub fn run_tagged(
        &mut self,
        tag: &str,
        nodes: &mut [Node],
        links: &[Link],
        settings: &LayoutSettings,
        now: Instant,
    ) -> Result<LayoutOutcome, LayoutError> {
        self.run(LayoutKind::from_tag(tag), nodes, links, settings, now)
    }

    pub fn advance(
        &mut self,
        handle: AnimationHandle,
        now: Instant,
        nodes: &mut [Node],
    ) -> AnimationProgress {
        self.animator.advance(handle, now, nodes)
    }

    pub fn cancel(&mut self) {
        self.animator.cancel();
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}
