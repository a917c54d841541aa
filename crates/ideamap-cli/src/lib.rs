use anyhow::{Context, Result};
use ideamap_core::{GraphDocument, LayoutKind, Node, NodeId, Position};
use ideamap_graph::{AnimationProgress, LayoutOrchestrator, LayoutOutcome, LayoutSettings};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Positions sorted by id so output is stable between runs.
pub type SortedPositions = BTreeMap<NodeId, Position>;

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub index: usize,
    pub elapsed_ms: u64,
    pub positions: SortedPositions,
}

pub fn read_document(path: &Path) -> Result<GraphDocument> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading graph {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parsing graph {:?}", path))
}

/// Settings from `config` if given, else the user config directory, else
/// defaults. `seed` overrides the force layout seed.
pub fn resolve_settings(config: Option<&Path>, seed: Option<u64>) -> Result<LayoutSettings> {
    let mut settings = match config {
        Some(path) => LayoutSettings::load_from(path)?,
        None => LayoutSettings::load(),
    };
    if seed.is_some() {
        settings.force.seed = seed;
    }
    Ok(settings)
}

fn snapshot(nodes: &[Node]) -> SortedPositions {
    nodes
        .iter()
        .map(|node| (node.id.clone(), node.position()))
        .collect()
}

/// Lays the document out in place and returns the final positions.
pub fn layout_document(
    doc: &mut GraphDocument,
    kind: LayoutKind,
    settings: &LayoutSettings,
) -> Result<SortedPositions> {
    let mut settings = settings.clone();
    settings.animation.animate = false;

    LayoutOrchestrator::new().run(kind, &mut doc.nodes, &doc.links, &settings, Instant::now())?;
    Ok(snapshot(&doc.nodes))
}

/// Plays the transition from the document's current positions to the layout
/// at `fps` frames per second of simulated time. The last frame holds the
/// final positions.
pub fn animation_frames(
    doc: &mut GraphDocument,
    kind: LayoutKind,
    settings: &LayoutSettings,
    fps: u32,
) -> Result<Vec<Frame>> {
    let interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut orchestrator = LayoutOrchestrator::new();
    let started = Instant::now();

    let handle =
        match orchestrator.run(kind, &mut doc.nodes, &doc.links, settings, started)? {
            LayoutOutcome::Applied => {
                return Ok(vec![Frame {
                    index: 0,
                    elapsed_ms: 0,
                    positions: snapshot(&doc.nodes),
                }]);
            }
            LayoutOutcome::Animating(handle) => handle,
        };

    let mut frames = Vec::new();
    let mut elapsed = Duration::ZERO;
    loop {
        elapsed += interval;
        let progress = orchestrator.advance(handle, started + elapsed, &mut doc.nodes);
        frames.push(Frame {
            index: frames.len(),
            elapsed_ms: elapsed.as_millis() as u64,
            positions: snapshot(&doc.nodes),
        });
        match progress {
            AnimationProgress::Running { .. } => continue,
            AnimationProgress::Finished | AnimationProgress::Stale => break,
        }
    }

    tracing::info!("Rendered {} animation frames", frames.len());
    Ok(frames)
}
