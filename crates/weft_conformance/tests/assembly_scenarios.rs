//! Assembler-level properties of phase order, binding validation, and
//! finalize.

use weft_assemble::{AssembleError, Assembler, FactoryRegistry, Phase, Scope};
use weft_common::Frequency;
use weft_conformance::{stub_cluster, stub_host, Stub};
use weft_topology::{BindError, PortKind, PortSpec};

fn c0() -> Frequency {
    Frequency::from_hz(10_000_000)
}

/// Clock `c0` plus `host` and `cluster`, no bindings yet.
fn two_domains(factories: &FactoryRegistry) -> Assembler<'_> {
    let mut asm = Assembler::new(Scope::root("board"), factories);
    asm.add_clock_domain("c0", c0()).unwrap();
    asm.add_instance("host", "stub", stub_host()).unwrap();
    asm.add_instance("cluster", "stub", stub_cluster()).unwrap();
    asm
}

#[test]
fn two_domain_board_finalizes() {
    let factories = FactoryRegistry::new();
    let mut asm = two_domains(&factories);
    asm.bind_clock("c0", "host", "clock").unwrap();
    asm.bind_clock("c0", "cluster", "clock").unwrap();
    asm.bind("host", "to_cluster", "cluster", "input").unwrap();

    let graph = asm.finalize().unwrap();
    assert_eq!(graph.subsystem_count(), 2);
    assert_eq!(graph.clock_count(), 1);
    assert_eq!(graph.binding_count(), 3);
    assert_eq!(graph.clock("c0").unwrap().frequency.hz(), 10_000_000);
    assert_eq!(asm.phase(), Phase::Finalized);
}

#[test]
fn omitted_cluster_clock_is_unbound() {
    let factories = FactoryRegistry::new();
    let mut asm = two_domains(&factories);
    asm.bind_clock("c0", "host", "clock").unwrap();
    asm.bind("host", "to_cluster", "cluster", "input").unwrap();

    match asm.finalize() {
        Err(AssembleError::UnboundRequiredPort { subsystem, port }) => {
            assert_eq!(subsystem, "cluster");
            assert_eq!(port, "clock");
        }
        other => panic!("expected UnboundRequiredPort, got {other:?}"),
    }
    // A failed finalize leaves the assembler usable.
    assert_eq!(asm.phase(), Phase::Wired);
    asm.bind_clock("c0", "cluster", "clock").unwrap();
    assert!(asm.finalize().is_ok());
}

#[test]
fn interconnect_to_clock_is_incompatible() {
    let factories = FactoryRegistry::new();
    let mut asm = two_domains(&factories);
    let err = asm.bind("host", "to_cluster", "cluster", "clock").unwrap_err();
    assert!(matches!(
        err,
        AssembleError::Bind(BindError::IncompatiblePortKind {
            from_kind: PortKind::Interconnect,
            to_kind: PortKind::Clock,
            ..
        })
    ));
    assert_eq!(asm.binding_count(), 0);
}

#[test]
fn kind_mismatch_fails_regardless_of_names() {
    let kinds = [PortKind::Clock, PortKind::Interconnect, PortKind::Interrupt];
    for from_kind in kinds {
        for to_kind in kinds {
            if from_kind == to_kind {
                continue;
            }
            let factories = FactoryRegistry::new();
            let mut asm = Assembler::new(Scope::root("board"), &factories);
            // Port names deliberately suggest the opposite kind.
            asm.add_instance(
                "a",
                "stub",
                Box::new(Stub(vec![PortSpec::output("clock", from_kind)])),
            )
            .unwrap();
            asm.add_instance(
                "b",
                "stub",
                Box::new(Stub(vec![PortSpec::input("clock", to_kind)])),
            )
            .unwrap();
            assert!(matches!(
                asm.bind("a", "clock", "b", "clock"),
                Err(AssembleError::Bind(BindError::IncompatiblePortKind { .. }))
            ));
        }
    }
}

#[test]
fn duplicate_sink_leaves_state_unchanged() {
    let factories = FactoryRegistry::new();
    let mut asm = Assembler::new(Scope::root("board"), &factories);
    asm.add_clock_domain("a", c0()).unwrap();
    asm.add_clock_domain("b", c0()).unwrap();
    asm.add_instance("host", "stub", stub_host()).unwrap();

    asm.bind_clock("a", "host", "clock").unwrap();
    let before = asm.binding_count();
    let phase = asm.phase();

    for clock in ["b", "a"] {
        let err = asm.bind_clock(clock, "host", "clock").unwrap_err();
        match err {
            AssembleError::Bind(BindError::DuplicateBinding { to, existing, from }) => {
                assert_eq!(to, "host.clock");
                assert_eq!(existing, "a.out");
                assert_eq!(from, format!("{clock}.out"));
            }
            other => panic!("expected DuplicateBinding, got {other:?}"),
        }
        assert_eq!(asm.binding_count(), before);
        assert_eq!(asm.phase(), phase);
    }

    let graph = asm.finalize().unwrap();
    let clock = graph.port("host", "clock").unwrap();
    let driver = graph.resolve(clock.address()).unwrap();
    assert_eq!(graph.endpoint(driver.from), "a.out");
}

#[test]
fn bind_before_subsystem_exists_then_after() {
    let factories = FactoryRegistry::new();
    let mut asm = Assembler::new(Scope::root("board"), &factories);
    asm.add_clock_domain("c0", c0()).unwrap();
    asm.add_instance("host", "stub", stub_host()).unwrap();

    let err = asm
        .bind("host", "to_cluster", "cluster", "input")
        .unwrap_err();
    assert!(matches!(err, AssembleError::UnknownSubsystem { ref name } if name == "cluster"));

    // Still in SubsystemsBuilt, so the subsystem can be added now.
    asm.add_instance("cluster", "stub", stub_cluster()).unwrap();
    asm.bind("host", "to_cluster", "cluster", "input").unwrap();
    assert_eq!(asm.binding_count(), 1);
}

#[test]
fn phase_order_is_enforced() {
    let factories = FactoryRegistry::new();
    let mut asm = two_domains(&factories);
    asm.bind_clock("c0", "host", "clock").unwrap();

    assert!(matches!(
        asm.add_clock_domain("late", c0()),
        Err(AssembleError::PhaseViolation {
            operation: "add_clock_domain",
            phase: Phase::Wired
        })
    ));
    assert!(matches!(
        asm.add_instance("late", "stub", stub_cluster()),
        Err(AssembleError::PhaseViolation { .. })
    ));
    assert_eq!(asm.phase(), Phase::Wired);
}

#[test]
fn nothing_is_allowed_after_finalize() {
    let factories = FactoryRegistry::new();
    let mut asm = Assembler::new(Scope::root("board"), &factories);
    asm.add_clock_domain("c0", c0()).unwrap();
    asm.finalize().unwrap();

    assert!(matches!(
        asm.finalize(),
        Err(AssembleError::PhaseViolation {
            operation: "finalize",
            phase: Phase::Finalized
        })
    ));
    assert!(matches!(
        asm.bind_clock("c0", "host", "clock"),
        Err(AssembleError::PhaseViolation { .. })
    ));
}

/// Builds `n` subsystems with a mandatory clock each, binds the clocks whose
/// bit is set in `mask`, and checks finalize succeeds exactly when all are set.
#[test]
fn finalize_succeeds_iff_every_mandatory_input_is_bound() {
    let n = 4;
    for mask in 0u32..(1 << n) {
        let factories = FactoryRegistry::new();
        let mut asm = Assembler::new(Scope::root("board"), &factories);
        asm.add_clock_domain("c0", c0()).unwrap();
        for i in 0..n {
            asm.add_instance(&format!("s{i}"), "stub", stub_cluster())
                .unwrap();
        }
        for i in 0..n {
            if mask & (1 << i) != 0 {
                asm.bind_clock("c0", &format!("s{i}"), "clock").unwrap();
            }
        }

        let all_bound = mask == (1 << n) - 1;
        let result = asm.finalize();
        assert_eq!(result.is_ok(), all_bound, "mask {mask:04b}");
        if let Err(AssembleError::UnboundRequiredPort { subsystem, .. }) = result {
            // The first unbound subsystem in declaration order is reported.
            let first = (0..n).find(|i| mask & (1 << i) == 0).unwrap();
            assert_eq!(subsystem, format!("s{first}"));
        }
    }
}

#[test]
fn names_are_shared_between_clocks_and_subsystems() {
    let factories = FactoryRegistry::new();
    let mut asm = Assembler::new(Scope::root("board"), &factories);
    asm.add_clock_domain("core", c0()).unwrap();
    assert!(matches!(
        asm.add_clock_domain("core", c0()),
        Err(AssembleError::DuplicateClockName { .. })
    ));
    assert!(matches!(
        asm.add_instance("core", "stub", stub_host()),
        Err(AssembleError::DuplicateSubsystemName { .. })
    ));
}

#[test]
fn zero_frequency_is_rejected() {
    let factories = FactoryRegistry::new();
    let mut asm = Assembler::new(Scope::root("board"), &factories);
    assert!(matches!(
        asm.add_clock_domain("dead", Frequency::from_hz(0)),
        Err(AssembleError::InvalidFrequency { .. })
    ));
    assert_eq!(asm.phase(), Phase::Created);
}
