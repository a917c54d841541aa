use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ideamap_bench::synthetic_tree;
use ideamap_graph::{ForceLayouter, Layouter, RadialLayouter, TreeLayouter};

fn bench_tree_layout_1000_nodes(c: &mut Criterion) {
    let (nodes, links) = synthetic_tree(1000, 4);
    let layouter = TreeLayouter::default();

    c.bench_function("tree_layout_1000_nodes", |b| {
        b.iter(|| {
            let positions = layouter.execute(black_box(&nodes), black_box(&links));
            black_box(positions)
        })
    });
}

fn bench_radial_layout_1000_nodes(c: &mut Criterion) {
    let (nodes, links) = synthetic_tree(1000, 4);
    let layouter = RadialLayouter::default();

    c.bench_function("radial_layout_1000_nodes", |b| {
        b.iter(|| {
            let positions = layouter.execute(black_box(&nodes), black_box(&links));
            black_box(positions)
        })
    });
}

fn bench_force_layout_200_nodes(c: &mut Criterion) {
    let (nodes, links) = synthetic_tree(200, 3);
    let layouter = ForceLayouter {
        seed: Some(7),
        ..ForceLayouter::default()
    };

    c.bench_function("force_layout_200_nodes", |b| {
        b.iter(|| {
            let positions = layouter.execute(black_box(&nodes), black_box(&links));
            black_box(positions)
        })
    });
}

criterion_group!(
    benches,
    bench_tree_layout_1000_nodes,
    bench_radial_layout_1000_nodes,
    bench_force_layout_200_nodes
);
criterion_main!(benches);
