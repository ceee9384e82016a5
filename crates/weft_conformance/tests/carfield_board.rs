//! The shipped Carfield board through the full pipeline.

use weft_conformance::{board_source, run_board, run_pipeline};

#[test]
fn carfield_assembles() {
    let result = run_board("carfield", None);
    assert!(!result.has_errors, "{:?}", result.codes());

    let graph = result.graph();
    assert_eq!(graph.scope(), "carfield");
    assert_eq!(graph.clock_count(), 2);
    assert_eq!(graph.subsystem_count(), 3);
    assert_eq!(graph.binding_count(), 5);

    let names: Vec<&str> = graph.subsystems().map(|s| graph.name(s.name)).collect();
    assert_eq!(names, ["ddr", "pulpd", "hostd"]);
    assert!(graph
        .clocks()
        .all(|c| c.frequency.hz() == 10_000_000));
}

#[test]
fn carfield_warnings() {
    let result = run_board("carfield", None);
    // Open optional inputs: ddr.input, hostd.cluster_dma_irq.
    // Idle outputs: hostd.system_axi, pulpd.dma_irq, pulpd.system_axi.
    assert_eq!(result.warning_count, 5);
    assert_eq!(
        result.codes(),
        ["W300", "W300", "W301", "W301", "W301"]
    );
    let origins: Vec<_> = result
        .diagnostics
        .iter()
        .filter_map(|d| d.origin.as_deref())
        .collect();
    assert!(origins.contains(&"subsystems[ddr]"));
    assert!(origins.contains(&"subsystems[pulpd]"));
}

#[test]
fn carfield_bindings_in_declaration_order() {
    let result = run_board("carfield", None);
    let graph = result.graph();
    let wired: Vec<(String, String)> = graph
        .bindings()
        .map(|b| (graph.endpoint(b.from), graph.endpoint(b.to)))
        .collect();
    assert_eq!(
        wired,
        [
            ("soc_clock_domain.out", "hostd.clock"),
            ("soc_clock_domain.out", "ddr.clock"),
            ("pulpd_clock_domain.out", "pulpd.clock"),
            ("hostd.to_cluster", "pulpd.input"),
            ("pulpd.soc", "hostd.cluster_in"),
        ]
        .map(|(f, t)| (f.to_string(), t.to_string()))
    );
}

#[test]
fn fast_variant_changes_frequencies_and_cluster_only() {
    let base = run_board("carfield", None);
    let fast = run_board("carfield", Some("fast"));
    assert!(!fast.has_errors, "{:?}", fast.codes());

    let (base, fast) = (base.graph(), fast.graph());
    assert!(fast.clocks().all(|c| c.frequency.hz() == 50_000_000));
    assert_eq!(fast.binding_count(), base.binding_count());

    let inner = |g: &weft_topology::PlatformGraph, name: &str| {
        g.subsystem(name).unwrap().inner().unwrap().subsystem_count()
    };
    // self + pe0..pe15 + l1
    assert_eq!(inner(fast, "pulpd"), 18);
    assert_eq!(inner(base, "pulpd"), 10);
    assert_eq!(inner(fast, "hostd"), inner(base, "hostd"));

    let host_fp = |g: &weft_topology::PlatformGraph| {
        g.subsystem("hostd").unwrap().inner().unwrap().fingerprint()
    };
    assert_eq!(host_fp(fast), host_fp(base));
}

#[test]
fn fingerprint_is_stable() {
    let a = run_board("carfield", None);
    let b = run_board("carfield", None);
    assert_eq!(a.graph().fingerprint(), b.graph().fingerprint());

    let fast = run_board("carfield", Some("fast"));
    assert_ne!(a.graph().fingerprint(), fast.graph().fingerprint());
}

#[test]
fn fingerprint_ignores_board_name() {
    let renamed = board_source("carfield").replace(
        "name = \"carfield\"",
        "name = \"carfield_rev_b\"",
    );
    let a = run_board("carfield", None);
    let b = run_pipeline(&renamed, None);
    assert_eq!(b.graph().scope(), "carfield_rev_b");
    assert_eq!(a.graph().fingerprint(), b.graph().fingerprint());
}

#[test]
fn fingerprint_tracks_topology() {
    let extra = board_source("carfield").replace(
        "[variants.fast]",
        "[[bindings]]\nfrom = \"hostd.system_axi\"\nto = \"ddr.input\"\n\n[variants.fast]",
    );
    let a = run_board("carfield", None);
    let b = run_pipeline(&extra, None);
    assert_eq!(b.graph().binding_count(), 6);
    assert_ne!(a.graph().fingerprint(), b.graph().fingerprint());
    // The new binding closes one open input and one idle output.
    assert_eq!(b.warning_count, 3);
}

#[test]
fn summary_round_trips_through_json() {
    let result = run_board("carfield", None);
    let summary = result.graph().summary();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["scope"], "carfield");
    assert_eq!(json["clocks"][0]["frequency"], "10MHz");
    assert_eq!(json["clocks"][0]["frequency_hz"], 10_000_000);
    assert_eq!(json["bindings"][3]["kind"], "interconnect");
    assert_eq!(json["subsystems"][2]["inner"]["scope"], "carfield/hostd");
}

#[test]
fn dot_output_names_every_component() {
    let result = run_board("carfield", None);
    let dot = result.graph().to_dot();
    assert!(dot.starts_with("digraph"));
    for name in ["soc_clock_domain", "pulpd_clock_domain", "ddr", "pulpd", "hostd"] {
        assert!(dot.contains(name), "missing {name}");
    }
}
