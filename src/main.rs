use graph_primitives::graph::{Candidate, Entity, GraphView, Node, Relationship, Subgraph};
use graph_primitives::{CastConfig, PropertySet};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Graph Primitives v{}", graph_primitives::version());
    println!("==========================================");
    println!();

    // Optional YAML config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => CastConfig::from_file(path)?,
        None => CastConfig::default(),
    };
    info!(
        "Using integer range [{}, {}]",
        config.integer_min, config.integer_max
    );

    demo_properties(&config)?;
    demo_graph_views()?;

    Ok(())
}

fn demo_properties(config: &CastConfig) -> anyhow::Result<()> {
    println!("=== Demo 1: Property Casting ===");

    let mut props = PropertySet::with_config(*config);
    props.set("name", "Alice")?;
    props.set("age", 33)?;
    props.set("tags", vec!["admin", "ops"])?;
    props.set("born", chrono::NaiveDate::from_ymd_opt(1990, 5, 17))?;
    println!("✓ Stored {}", props);

    props.set("age", None::<i64>)?;
    println!("✓ Setting age to null removed it: {}", props);

    match props.set("mixed", Candidate::List(vec![1.into(), "two".into()])) {
        Ok(()) => println!("✗ Mixed list unexpectedly accepted"),
        Err(e) => println!("✓ Rejected mixed list: {}", e),
    }

    println!("  JSON: {}", serde_json::to_string(&props)?);
    Ok(())
}

fn demo_graph_views() -> anyhow::Result<()> {
    println!("\n=== Demo 2: Graph Views ===");

    let alice = Node::new(["Person"]).with_property("name", "Alice")?;
    let bob = Node::new(["Person"]).with_property("name", "Bob")?;
    let carol = Node::new(["Person", "Employee"]).with_property("name", "Carol")?;

    let alice_knows_bob = Relationship::new(&alice, "KNOWS", &bob).with_property("since", 2020)?;
    let bob_works_with_carol = Relationship::new(&bob, "WORKS_WITH", &carol);
    println!("✓ {}", alice_knows_bob);

    let graph = &alice_knows_bob | &bob_works_with_carol;
    println!("✓ Combined: {}", graph);
    println!("  Labels: {:?}", graph.labels());
    println!("  Types: {:?}", graph.types());
    println!("  Property keys: {:?}", graph.property_keys());

    let without_bob = graph.difference(&GraphView::from_nodes([bob.clone()]));
    println!(
        "✓ Removing Bob keeps him as an endpoint: {} (contains Bob: {})",
        without_bob,
        without_bob.nodes().contains(&bob)
    );

    bob.set_property("age", 41)?;
    println!("  Bob's new age is visible through the view: {:?}", without_bob.property_keys());

    Ok(())
}
