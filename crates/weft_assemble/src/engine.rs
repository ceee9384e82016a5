//! The hand-off point to an external execution engine.

use std::sync::Arc;

use weft_topology::PlatformGraph;

/// A consumer of finalized platforms.
///
/// The engine owns all timing and event behavior from the moment it receives
/// the graph. The graph is immutable, so the engine may share the handle
/// across as many execution contexts as it likes.
pub trait ExecutionEngine {
    /// Takes ownership of a shared handle to the finalized platform.
    fn attach(&mut self, platform: Arc<PlatformGraph>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::factory::FactoryRegistry;
    use crate::scope::Scope;
    use weft_common::Frequency;

    #[derive(Default)]
    struct Recorder {
        platforms: Vec<Arc<PlatformGraph>>,
    }

    impl ExecutionEngine for Recorder {
        fn attach(&mut self, platform: Arc<PlatformGraph>) {
            self.platforms.push(platform);
        }
    }

    #[test]
    fn finalize_into_hands_off_shared_graph() {
        let factories = FactoryRegistry::new();
        let mut asm = Assembler::new(Scope::root("board"), &factories);
        asm.add_clock_domain("c0", Frequency::from_mhz(10)).unwrap();
        let mut engine = Recorder::default();
        let graph = asm.finalize_into(&mut engine).unwrap();
        assert_eq!(engine.platforms.len(), 1);
        assert!(Arc::ptr_eq(&graph, &engine.platforms[0]));
        assert_eq!(engine.platforms[0].clock_count(), 1);
    }

    #[test]
    fn failed_finalize_hands_off_nothing() {
        let factories = FactoryRegistry::new();
        let mut asm = Assembler::new(Scope::root("board"), &factories);
        asm.finalize().unwrap();
        let mut engine = Recorder::default();
        assert!(asm.finalize_into(&mut engine).is_err());
        assert!(engine.platforms.is_empty());
    }
}
