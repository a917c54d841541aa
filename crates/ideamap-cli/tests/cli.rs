use ideamap_cli::{animation_frames, layout_document, read_document, resolve_settings};
use ideamap_core::{LayoutKind, NodeId, Position};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const GRAPH: &str = r#"{
    "nodes": [
        { "id": "A" }, { "id": "B" }, { "id": "C" }, { "id": "D" }
    ],
    "links": [
        { "source": "A", "target": "B" },
        { "source": "A", "target": "C" },
        { "source": "B", "target": "D" }
    ]
}"#;

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture written");
    path
}

#[test]
fn layout_document_returns_sorted_positions() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_fixture(&dir, "graph.json", GRAPH);
    let mut doc = read_document(&input)?;
    let config = write_fixture(&dir, "layout.json", "{}");
    let settings = resolve_settings(Some(config.as_path()), None)?;

    let positions = layout_document(&mut doc, LayoutKind::Tree, &settings)?;

    let ids: Vec<&str> = positions.keys().map(NodeId::as_str).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);
    assert_eq!(positions[&NodeId::from("A")], Position::new(0.0, 50.0));
    assert_eq!(
        serde_json::to_value(&positions)?["D"],
        serde_json::json!({ "x": 400.0, "y": 0.0 })
    );
    Ok(())
}

#[test]
fn config_file_and_seed_override_are_applied() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = write_fixture(
        &dir,
        "layout.json",
        r#"{ "tree": { "horizontal_spacing": 50 }, "force": { "seed": 1 } }"#,
    );

    let settings = resolve_settings(Some(config.as_path()), Some(99))?;

    assert_eq!(settings.tree.horizontal_spacing, 50.0);
    assert_eq!(settings.force.seed, Some(99));
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let err = resolve_settings(Some(missing.as_path()), None).unwrap_err();

    assert!(format!("{:#}", err).contains("reading layout settings"));
}

#[test]
fn malformed_graph_reports_path() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "broken.json", r#"{ "nodes": [ { "x": 1 } ] }"#);

    let err = read_document(&input).unwrap_err();

    assert!(format!("{:#}", err).contains("parsing graph"));
}

#[test]
fn animation_frames_end_on_layout() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_fixture(&dir, "graph.json", GRAPH);
    let config = write_fixture(&dir, "layout.json", r#"{ "animation": { "duration_ms": 100 } }"#);
    let settings = resolve_settings(Some(config.as_path()), None)?;
    let mut doc = read_document(&input)?;

    let frames = animation_frames(&mut doc, LayoutKind::Radial, &settings, 50)?;

    assert_eq!(frames.len(), 5);
    assert_eq!(frames[4].elapsed_ms, 100);
    assert_eq!(frames[4].positions[&NodeId::from("A")], Position::new(400.0, 300.0));
    assert!(frames[0].positions[&NodeId::from("A")].x < 400.0);
    Ok(())
}

#[test]
fn animation_disabled_yields_single_frame() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_fixture(&dir, "graph.json", GRAPH);
    let config = write_fixture(&dir, "layout.json", r#"{ "animation": { "animate": false } }"#);
    let settings = resolve_settings(Some(config.as_path()), None)?;
    let mut doc = read_document(&input)?;

    let frames = animation_frames(&mut doc, LayoutKind::Tree, &settings, 60)?;

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].positions[&NodeId::from("C")], Position::new(200.0, 100.0));
    Ok(())
}
