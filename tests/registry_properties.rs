//! Property-based tests for module registry invariants.
//!
//! Tests validate:
//! 1. Headers always precede every other module
//! 2. Ids stay unique under any sequence of operations
//! 3. Upserting the same module twice equals upserting it once
//! 4. Positioning against a missing reference falls back to the ends

use panelkit::model::Module;
use panelkit::state::{ModuleRegistry, Positioning};
use panelkit::ModuleId;
use proptest::prelude::*;

/// One registry operation over a small id space so collisions are common.
#[derive(Debug, Clone)]
enum Op {
    Upsert {
        id: u8,
        is_header: bool,
        positioning: Positioning,
    },
    Remove(u8),
}

fn module(id: u8, is_header: bool) -> Module {
    let id = format!("m{id}");
    if is_header {
        Module::header(id, "Header")
    } else {
        Module::text(id, "Text")
    }
}

fn positioning() -> impl Strategy<Value = Positioning> {
    prop_oneof![
        Just(Positioning::Bottom),
        Just(Positioning::Top),
        (0u8..8).prop_map(|id| Positioning::Above(ModuleId::from(format!("m{id}")))),
        (0u8..8).prop_map(|id| Positioning::Below(ModuleId::from(format!("m{id}")))),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..8, any::<bool>(), positioning()).prop_map(|(id, is_header, positioning)| {
            Op::Upsert { id, is_header, positioning }
        }),
        1 => (0u8..8).prop_map(Op::Remove),
    ]
}

fn apply(registry: &mut ModuleRegistry, op: Op) {
    match op {
        Op::Upsert {
            id,
            is_header,
            positioning,
        } => registry.upsert(module(id, is_header), positioning),
        Op::Remove(id) => {
            registry.remove(&ModuleId::from(format!("m{id}")));
        }
    }
}

fn ids(registry: &ModuleRegistry) -> Vec<String> {
    registry.iter().map(|m| m.id().to_string()).collect()
}

// ===== Property 1: Header Ordering =====

proptest! {
    #[test]
    fn headers_precede_all_other_modules(ops in prop::collection::vec(op(), 0..40)) {
        let mut registry = ModuleRegistry::new();
        for op in ops {
            apply(&mut registry, op);
        }

        let first_non_header = registry.iter().position(|m| !m.is_header());
        if let Some(boundary) = first_non_header {
            prop_assert!(
                registry.iter().skip(boundary).all(|m| !m.is_header()),
                "Header found after a non-header module: {:?}",
                ids(&registry)
            );
        }
    }

    #[test]
    fn replace_all_sorts_headers_first(flags in prop::collection::vec(any::<bool>(), 0..20)) {
        let mut registry = ModuleRegistry::new();
        registry.replace_all(
            flags.iter().enumerate().map(|(index, is_header)| module(index as u8, *is_header)),
        );

        let headers = flags.iter().filter(|is_header| **is_header).count();
        prop_assert!(registry.iter().take(headers).all(Module::is_header));
        prop_assert_eq!(registry.len(), flags.len());
    }
}

// ===== Property 2: Unique Ids =====

proptest! {
    #[test]
    fn ids_remain_unique(ops in prop::collection::vec(op(), 0..40)) {
        let mut registry = ModuleRegistry::new();
        for op in ops {
            apply(&mut registry, op);
        }

        let mut sorted = ids(&registry);
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), registry.len());
    }
}

// ===== Property 3: Idempotent Upsert =====

proptest! {
    #[test]
    fn upsert_twice_equals_upsert_once(
        ops in prop::collection::vec(op(), 0..20),
        id in 0u8..8,
        is_header in any::<bool>(),
        positioning in positioning(),
    ) {
        let mut once = ModuleRegistry::new();
        for op in ops {
            apply(&mut once, op);
        }
        let mut twice = once.clone();

        once.upsert(module(id, is_header), positioning.clone());
        twice.upsert(module(id, is_header), positioning.clone());
        twice.upsert(module(id, is_header), positioning);

        prop_assert_eq!(ids(&once), ids(&twice));
    }
}

// ===== Property 4: Positioning Fallback =====

proptest! {
    #[test]
    fn missing_reference_falls_back_to_ends(count in 0u8..8) {
        let mut registry = ModuleRegistry::new();
        registry.replace_all((0..count).map(|id| module(id, false)));

        registry.upsert(Module::text("above", "x"), Positioning::Above("missing".into()));
        registry.upsert(Module::text("below", "x"), Positioning::Below("missing".into()));

        let ids = ids(&registry);
        prop_assert_eq!(ids.first().map(String::as_str), Some("above"));
        prop_assert_eq!(ids.last().map(String::as_str), Some("below"));
    }
}
