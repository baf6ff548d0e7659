//! kapigraph — graph Kapitan class hierarchies
//!
//! Reads a Kapitan inventory (`classes/` and `targets/` YAML trees), resolves
//! which classes each target includes, and writes a Graphviz DOT file with one
//! edge per include.
//!
//! # Quickstart (Library)
//! ```no_run
//! use kapigraph::graph::resolve_targets;
//! use kapigraph::inventory::Inventory;
//! use kapigraph::visualization::DotGenerator;
//!
//! let inventory = Inventory::load(std::path::Path::new("inventory")).expect("load inventory");
//! let universe = inventory.universe();
//! let resolution = resolve_targets(&universe, inventory.target_names());
//! println!("{}", DotGenerator::new().generate_dot(&resolution.relationships));
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! kapigraph --inventory inventory --output kapitan.dot
//! kapigraph -t cluster1 -f "Fira Sans" --svg cluster1.svg
//! ```
//!
//! Reference cycles between classes are broken at the first edge back into a
//! class that is still being resolved and reported as warnings.
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod inventory;
pub mod parser;
pub mod utils;
pub mod visualization;
