use craft::layout::{parse_rects, rect_distances, symmetrize, uniform_unit_cost, Metric};
use craft::{LocalSearch, SearchOptions};
use tracing_subscriber::EnvFilter;

const PLAN: &str = "0,40,0,20; 40,60,0,20; 0,20,20,40; 20,60,20,40; 60,80,0,40";

#[rustfmt::skip]
const FLOW: [f64; 25] = [
     0., 45., 15., 25., 10.,
    30.,  0., 20.,  5., 35.,
    10., 20.,  0., 40., 15.,
    20.,  5., 30.,  0., 25.,
     5., 40., 10., 20.,  0.,
];

fn label(entity: usize) -> char {
    (b'A' + entity as u8) as char
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rects = parse_rects(PLAN, Some(5))?;
    let n = rects.len();
    let distance = symmetrize(&rect_distances(&rects, Metric::Manhattan))?;
    let flow = nalgebra::DMatrix::from_row_slice(n, n, &FLOW);
    let unit_cost = uniform_unit_cost(n);

    let options = match std::env::args().nth(1) {
        Some(path) => SearchOptions::from_toml_file(path)?,
        None => SearchOptions::default(),
    };

    let outcome = LocalSearch::new(&flow, &distance, &unit_cost, &options)?.run();

    println!("initial cost: {:.4}", outcome.initial_cost());
    println!("final cost:   {:.4} ({:?})", outcome.cost, outcome.termination);
    println!("savings:      {:.4}", outcome.savings());

    println!("\nassignment:");
    for (entity, location) in outcome.permutation.iter().enumerate() {
        println!("  {} -> {}", label(entity), location + 1);
    }

    let order: Vec<String> = outcome
        .location_order()
        .into_iter()
        .map(|entity| label(entity).to_string())
        .collect();
    println!("\nby location: {}", order.join("  "));

    println!("\nhistory:");
    for entry in &outcome.history {
        println!("  {:<24}  {:.4}", entry.label.to_string(), entry.cost);
    }

    Ok(())
}
