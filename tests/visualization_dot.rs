use kapigraph::graph::{resolve_targets, Relationships, Universe};
use kapigraph::visualization::{DotGenerator, DotOptions, EdgeStyle};

fn universe(entries: &[(&str, &[&str])]) -> Universe {
    entries
        .iter()
        .map(|(k, ps)| ((*k).to_string(), ps.iter().map(|p| (*p).to_string()).collect()))
        .collect()
}

#[test]
fn dot_matches_resolved_edges() {
    let u = universe(&[("app", &["base"]), ("base", &[]), ("cluster1", &["app"])]);
    let res = resolve_targets(&u, ["cluster1"]);
    let dot = DotGenerator::new().generate_dot(&res.relationships);

    let edges: Vec<&str> = dot.lines().map(str::trim).filter(|l| l.contains("->")).collect();
    assert_eq!(edges, vec!["\"app\" -> \"base\";", "\"cluster1\" -> \"app\";"]);
}

#[test]
fn dot_output_is_deterministic() {
    let u = universe(&[
        ("t1", &["c", "b", "a"]),
        ("t2", &["b"]),
        ("a", &["base"]),
        ("b", &["base"]),
        ("c", &[]),
        ("base", &[]),
    ]);
    let first = DotGenerator::new().generate_dot(&resolve_targets(&u, ["t2", "t1"]).relationships);
    let second = DotGenerator::new().generate_dot(&resolve_targets(&u, ["t1", "t2"]).relationships);
    assert_eq!(first, second);
}

#[test]
fn empty_graph_is_still_valid_dot() {
    let dot = DotGenerator::new().generate_dot(&Relationships::new());
    assert!(dot.starts_with("digraph \"kapitan\" {"));
    assert!(!dot.contains("->"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn options_control_graph_attributes() {
    let rel: Relationships = [("t", vec!["a"]), ("a", vec![])].into_iter().collect();
    let opts = DotOptions {
        name: "inventory".into(),
        layout: "fdp".into(),
        splines: EdgeStyle::Curved,
        overlap: true,
        shape: "box".into(),
        fontsize: 12,
        font: Some("Helvetica".into()),
    };
    let dot = DotGenerator::new().generate_dot_with_options(&rel, &opts);
    assert!(dot.starts_with("digraph \"inventory\" {"));
    assert!(dot.contains("graph [fontsize=12, layout=fdp, splines=curved, overlap=true];"));
    assert!(dot.contains("node [shape=box, fontname=\"Helvetica\"];"));
}
