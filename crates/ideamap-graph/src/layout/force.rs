use super::Layouter;
use ideamap_core::{LayoutError, Link, Node, NodeId, Position, PositionMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spring/repulsion simulation inside a `width` x `height` box.
///
/// Links act as springs only, so cyclic or cross-tree links are fine here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceLayouter {
    pub width: f64,
    pub height: f64,
    /// Number of simulation steps; there is no convergence check
    pub iterations: usize,
    /// Seed for initial placement and overlap jitter. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ForceLayouter {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            iterations: Self::DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl ForceLayouter {
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 600.0;
    pub const DEFAULT_ITERATIONS: usize = 200;
}

impl Layouter for ForceLayouter {
    fn execute(&self, nodes: &[Node], links: &[Link]) -> Result<PositionMap, LayoutError> {
        let mut simulation = ForceSimulation::new(self, nodes, links);
        if simulation.is_empty() {
            return Ok(PositionMap::new());
        }

        for _ in 0..self.iterations {
            simulation.step();
        }

        tracing::debug!(
            "Force layout ran {} iterations over {} nodes and {} springs",
            self.iterations,
            simulation.len(),
            simulation.springs.len()
        );

        Ok(simulation.positions())
    }
}

/// State of one force layout run, advanced one iteration at a time.
#[derive(Debug)]
pub struct ForceSimulation {
    ids: Vec<NodeId>,
    positions: Vec<Position>,
    displacement: Vec<Position>,
    springs: Vec<(usize, usize)>,
    width: f64,
    height: f64,
    ideal_length: f64,
    repulsion: f64,
    rng: StdRng,
}

impl ForceSimulation {
    /// Largest move per axis in a single iteration.
    pub const MAX_STEP: f64 = 5.0;
    const SPRING_STIFFNESS: f64 = 0.1;
    const MIN_DISTANCE_SQ: f64 = 0.01;
    const MIN_SPRING_LENGTH: f64 = 1.0;
    const JITTER: f64 = 0.01;

    pub fn new(options: &ForceLayouter, nodes: &[Node], links: &[Link]) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut index: HashMap<&NodeId, usize> = HashMap::with_capacity(nodes.len());
        let mut ids = Vec::with_capacity(nodes.len());
        let mut positions = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index.contains_key(&node.id) {
                tracing::debug!("Duplicate node id {}, keeping first occurrence", node.id);
                continue;
            }
            index.insert(&node.id, ids.len());
            ids.push(node.id.clone());
            positions.push(Self::initial_position(node, options, &mut rng));
        }

        let springs = links
            .iter()
            .filter_map(|link| {
                let endpoints = index
                    .get(&link.source)
                    .copied()
                    .zip(index.get(&link.target).copied());
                if endpoints.is_none() {
                    tracing::debug!(
                        "Ignoring link {} -> {}: endpoint missing from node set",
                        link.source,
                        link.target
                    );
                }
                endpoints
            })
            .collect();

        let count = ids.len();
        let ideal_length = if count == 0 {
            0.0
        } else {
            (options.width * options.height / count as f64).sqrt()
        };

        Self {
            ids,
            displacement: vec![Position::default(); count],
            positions,
            springs,
            width: options.width,
            height: options.height,
            ideal_length,
            repulsion: ideal_length * ideal_length,
            rng,
        }
    }

    /// Keeps the caller's position unless both coordinates are unset.
    fn initial_position(node: &Node, options: &ForceLayouter, rng: &mut StdRng) -> Position {
        let unset = |v: f64| v == 0.0 || v.is_nan();
        if unset(node.x) && unset(node.y) {
            Position::new(
                rng.gen_range(0.0..=1.0) * options.width,
                rng.gen_range(0.0..=1.0) * options.height,
            )
        } else {
            node.position()
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ideal spring length `sqrt(width * height / n)`.
    pub fn ideal_length(&self) -> f64 {
        self.ideal_length
    }

    pub fn positions(&self) -> PositionMap {
        self.ids
            .iter()
            .cloned()
            .zip(self.positions.iter().copied())
            .collect()
    }

    pub fn step(&mut self) {
        self.displacement.fill(Position::default());
        self.apply_repulsion();
        self.apply_springs();
        self.integrate();
    }

    fn apply_repulsion(&mut self) {
        let count = self.positions.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let mut dx = self.positions[i].x - self.positions[j].x;
                let mut dy = self.positions[i].y - self.positions[j].y;
                let mut dist_sq = dx * dx + dy * dy;

                if dist_sq == 0.0 {
                    dx = self.rng.gen_range(-Self::JITTER..Self::JITTER);
                    dy = self.rng.gen_range(-Self::JITTER..Self::JITTER);
                    dist_sq = (dx * dx + dy * dy).max(Self::MIN_DISTANCE_SQ);
                }

                let dist = dist_sq.sqrt();
                let force = self.repulsion / dist_sq;
                let fx = dx / dist * force;
                let fy = dy / dist * force;

                self.displacement[i].x += fx;
                self.displacement[i].y += fy;
                self.displacement[j].x -= fx;
                self.displacement[j].y -= fy;
            }
        }
    }

    fn apply_springs(&mut self) {
        for &(source, target) in &self.springs {
            let dx = self.positions[target].x - self.positions[source].x;
            let dy = self.positions[target].y - self.positions[source].y;
            let dist = (dx * dx + dy * dy).sqrt().max(Self::MIN_SPRING_LENGTH);
            let force = (dist - self.ideal_length) * Self::SPRING_STIFFNESS;
            let fx = dx / dist * force;
            let fy = dy / dist * force;

            self.displacement[source].x += fx;
            self.displacement[source].y += fy;
            self.displacement[target].x -= fx;
            self.displacement[target].y -= fy;
        }
    }

    fn integrate(&mut self) {
        for (position, delta) in self.positions.iter_mut().zip(&self.displacement) {
            let x = position.x + delta.x.clamp(-Self::MAX_STEP, Self::MAX_STEP);
            let y = position.y + delta.y.clamp(-Self::MAX_STEP, Self::MAX_STEP);
            // f64::clamp panics on an inverted box (width or height below zero)
            position.x = x.max(0.0).min(self.width);
            position.y = y.max(0.0).min(self.height);
        }
    }
}
