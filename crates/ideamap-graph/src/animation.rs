use ideamap_core::{Node, PositionMap};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// When false, layout results are applied immediately
    pub animate: bool,
    pub duration_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            animate: true,
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }
}

impl AnimationSettings {
    pub const DEFAULT_DURATION_MS: u64 = 500;

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Quadratic ease-in-out. `ease_in_out(0) == 0`, `ease_in_out(1) == 1`.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Writes every position in `positions` into the node with the same id.
/// Nodes without an entry keep their position.
pub fn apply_positions(nodes: &mut [Node], positions: &PositionMap) {
    for node in nodes.iter_mut() {
        if let Some(&position) = positions.get(&node.id) {
            node.set_position(position);
        }
    }
}

/// Identifies one `Animator::start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    generation: u64,
}

impl AnimationHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationProgress {
    /// Nodes moved to an interpolated position; `fraction` is the raw time fraction.
    Running { fraction: f64 },
    /// Nodes are exactly at their targets and the animation is over.
    Finished,
    /// The handle does not refer to the running animation. Nothing was written.
    Stale,
}

impl AnimationProgress {
    pub fn is_running(&self) -> bool {
        matches!(self, AnimationProgress::Running { .. })
    }
}

/// One interpolation from captured start positions to targets.
#[derive(Debug, Clone)]
pub struct AnimationState {
    generation: u64,
    started_at: Instant,
    duration: Duration,
    start: PositionMap,
    target: PositionMap,
}

impl AnimationState {
    /// Positions at `now` and whether the animation is complete. The final
    /// frame returns the targets themselves, not an interpolation.
    pub fn advance(&self, now: Instant) -> (PositionMap, bool) {
        let fraction = self.fraction(now);
        if fraction >= 1.0 {
            return (self.target.clone(), true);
        }

        let eased = ease_in_out(fraction);
        let positions = self
            .target
            .iter()
            .filter_map(|(id, target)| {
                let start = self.start.get(id)?;
                let mut position = *start;
                position.x += (target.x - start.x) * eased;
                position.y += (target.y - start.y) * eased;
                Some((id.clone(), position))
            })
            .collect();
        (positions, false)
    }

    pub fn fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn targets(&self) -> &PositionMap {
        &self.target
    }
}

/// Drives at most one animation at a time. Starting a new one retires the
/// previous handle, so overlapping callers cannot fight over node positions.
#[derive(Debug, Default)]
pub struct Animator {
    generation: u64,
    active: Option<AnimationState>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current position of every node that has a target.
    /// Targets naming unknown nodes are dropped.
    pub fn start(
        &mut self,
        nodes: &[Node],
        targets: PositionMap,
        duration: Duration,
        now: Instant,
    ) -> AnimationHandle {
        self.generation = self.generation.wrapping_add(1);

        let mut start = PositionMap::with_capacity(targets.len());
        for node in nodes {
            if targets.contains_key(&node.id) {
                start.entry(node.id.clone()).or_insert_with(|| node.position());
            }
        }
        let target: PositionMap = targets
            .into_iter()
            .filter(|(id, _)| start.contains_key(id))
            .collect();

        tracing::debug!(
            "Starting animation {} for {} nodes over {:?}",
            self.generation,
            target.len(),
            duration
        );

        self.active = Some(AnimationState {
            generation: self.generation,
            started_at: now,
            duration,
            start,
            target,
        });

        AnimationHandle {
            generation: self.generation,
        }
    }

    /// Moves the nodes to their positions at `now`. Call once per frame until
    /// it stops returning `Running`.
    pub fn advance(
        &mut self,
        handle: AnimationHandle,
        now: Instant,
        nodes: &mut [Node],
    ) -> AnimationProgress {
        let Some(state) = self
            .active
            .as_ref()
            .filter(|state| state.generation == handle.generation)
        else {
            return AnimationProgress::Stale;
        };

        let fraction = state.fraction(now);
        let (positions, done) = state.advance(now);
        apply_positions(nodes, &positions);

        if done {
            self.active = None;
            AnimationProgress::Finished
        } else {
            AnimationProgress::Running { fraction }
        }
    }

    /// Drops the running animation, leaving nodes where the last frame put them.
    pub fn cancel(&mut self) {
        if let Some(state) = self.active.take() {
            tracing::debug!("Cancelled animation {}", state.generation);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|state| AnimationHandle {
            generation: state.generation,
        })
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.active.as_ref()
    }
}
