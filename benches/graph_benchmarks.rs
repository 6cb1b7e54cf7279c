use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_primitives::graph::{cast, Candidate, GraphView, Node, PropertySet, Relationship, Subgraph};

/// Build a path of `size` nodes joined by `size - 1` KNOWS relationships
fn path_graph(size: usize) -> (Vec<Node>, GraphView) {
    let nodes: Vec<Node> = (0..size).map(|_| Node::new(["Person"])).collect();
    let relationships: Vec<Relationship> = nodes
        .windows(2)
        .map(|pair| Relationship::new(&pair[0], "KNOWS", &pair[1]))
        .collect();
    let view = GraphView::new(nodes.clone(), relationships);
    (nodes, view)
}

/// Benchmark casting of scalar and list property values
fn bench_cast(c: &mut Criterion) {
    let mut group = c.benchmark_group("cast");

    group.bench_function("integer", |b| {
        b.iter(|| criterion::black_box(cast(42i64).unwrap()));
    });

    for len in [10, 100, 1000].iter() {
        let list: Vec<i64> = (0..*len).collect();
        group.bench_with_input(BenchmarkId::new("integer_list", len), &list, |b, list| {
            b.iter(|| criterion::black_box(cast(list.clone()).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark property set updates
fn bench_property_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("property_set");

    for size in [10, 100, 1000].iter() {
        let pairs: Vec<(String, Candidate)> = (0..*size)
            .map(|i| (format!("key{}", i), Candidate::from(i)))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &pairs, |b, pairs| {
            b.iter(|| {
                let mut props = PropertySet::new();
                props.update(pairs.clone()).unwrap();
                criterion::black_box(props.len());
            });
        });
    }
    group.finish();
}

/// Benchmark graph view set algebra with node induction
fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");

    for size in [100, 1000, 10_000].iter() {
        let (nodes, view) = path_graph(*size);
        let half = GraphView::from_nodes(nodes[..size / 2].to_vec());

        group.bench_with_input(BenchmarkId::new("union", size), size, |b, _| {
            b.iter(|| criterion::black_box(view.union(&half).order()));
        });
        group.bench_with_input(BenchmarkId::new("difference", size), size, |b, _| {
            b.iter(|| criterion::black_box(view.difference(&half).order()));
        });
        group.bench_with_input(BenchmarkId::new("symmetric_difference", size), size, |b, _| {
            b.iter(|| criterion::black_box(view.symmetric_difference(&half).order()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cast, bench_property_set, bench_set_algebra);
criterion_main!(benches);
