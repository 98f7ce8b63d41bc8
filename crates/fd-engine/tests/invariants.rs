//! Property tests over random edit sequences.

use fd_core::numeric::{VOLUME_RESOLUTION, VOLUME_SLACK, truncate_1dp};
use fd_engine::{FormulationConfig, FormulationEngine, MaxVolume};
use fd_mix::{Composition, Ingredient};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { pg: f64, nic: f64, share: f64 },
    SetVolume { slot: usize, share: f64 },
    SetFill { slot: Option<usize> },
    Remove { slot: usize },
    Resize { capacity: f64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0.0_f64..=100.0, 0.0_f64..30.0, 0.0_f64..=1.0)
            .prop_map(|(pg, nic, share)| Op::Add { pg, nic, share }),
        4 => (0_usize..8, 0.0_f64..=1.2).prop_map(|(slot, share)| Op::SetVolume { slot, share }),
        2 => prop::option::of(0_usize..8).prop_map(|slot| Op::SetFill { slot }),
        1 => (0_usize..8).prop_map(|slot| Op::Remove { slot }),
        1 => (10.0_f64..2_000.0).prop_map(|capacity| Op::Resize { capacity }),
    ]
}

fn apply(engine: &mut FormulationEngine, op: &Op) {
    match *op {
        Op::Add { pg, nic, share } => {
            let volume = truncate_1dp(engine.free_capacity().max(0.0) * share);
            let ingredient =
                Ingredient::new("x", Composition::new(pg, 100.0 - pg).unwrap(), nic, 0.0, volume)
                    .unwrap();
            let _ = engine.add(ingredient);
        }
        Op::SetVolume { slot, share } => {
            if let Some(id) = engine.id_at(slot)
                && let Some(max) = engine.allowed_max(id)
            {
                let _ = engine.set_volume(id, truncate_1dp(max * share));
            }
        }
        Op::SetFill { slot } => {
            let target = slot.and_then(|s| engine.id_at(s));
            let _ = engine.set_fill(target);
        }
        Op::Remove { slot } => {
            if let Some(id) = engine.id_at(slot) {
                let _ = engine.remove(id);
            }
        }
        Op::Resize { capacity } => {
            let _ = engine.resize_capacity(capacity);
        }
    }
}

fn check_invariants(engine: &FormulationEngine) -> Result<(), TestCaseError> {
    prop_assert!(engine.total_volume() <= engine.capacity() + VOLUME_SLACK);

    if let Some(fill) = engine.fill() {
        let others: f64 = engine
            .ingredients()
            .filter(|(id, _)| *id != fill)
            .map(|(_, ing)| ing.volume())
            .sum();
        let expected = truncate_1dp(engine.capacity() - others).max(0.0);
        prop_assert_eq!(engine.ingredient(fill).unwrap().volume(), expected);
    }

    for (_, ing) in engine.ingredients() {
        prop_assert!(ing.volume() >= 0.0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_op(ops in prop::collection::vec(op(), 1..40)) {
        let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
        for op in &ops {
            apply(&mut engine, op);
            check_invariants(&engine)?;
        }
    }

    #[test]
    fn dump_load_round_trip(
        ops in prop::collection::vec(op(), 1..30),
        name in "[ a-zA-Z]{0,12}",
        notes in "[ a-z]{0,20}",
    ) {
        let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
        engine.set_name(name);
        engine.set_notes(notes);
        for op in &ops {
            apply(&mut engine, op);
        }
        let snapshot = engine.dump();
        let mut restored = FormulationEngine::new(FormulationConfig::default()).unwrap();
        restored.load(&snapshot).unwrap();
        prop_assert_eq!(restored.dump(), snapshot);
    }

    #[test]
    fn full_container_accepts_no_increase(ops in prop::collection::vec(op(), 1..40)) {
        let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
        for op in &ops {
            apply(&mut engine, op);
        }
        if engine.free_capacity() < VOLUME_RESOLUTION {
            let fill = engine.fill();
            let free: Vec<_> = engine
                .ingredients()
                .filter(|(id, _)| Some(*id) != fill)
                .map(|(id, ing)| (id, ing.volume()))
                .collect();
            for (id, volume) in free {
                prop_assert_eq!(engine.max_volume(id), Some(MaxVolume::Full));
                prop_assert!(engine.set_volume(id, volume + VOLUME_RESOLUTION).is_err());
            }
        }
    }

    #[test]
    fn resize_is_proportional(
        ops in prop::collection::vec(op(), 1..20),
        capacity in 10.0_f64..5_000.0,
    ) {
        let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
        for op in &ops {
            apply(&mut engine, op);
        }
        let old_capacity = engine.capacity();
        let fill = engine.fill();
        let before: Vec<_> = engine
            .ingredients()
            .filter(|(id, _)| Some(*id) != fill)
            .map(|(id, ing)| (id, ing.volume()))
            .collect();

        engine.resize_capacity(capacity).unwrap();
        let ratio = capacity / old_capacity;
        for (id, volume) in before {
            let after = engine.ingredient(id).unwrap().volume();
            prop_assert!((after - volume * ratio).abs() <= 0.1);
        }
        check_invariants(&engine)?;
    }

    #[test]
    fn fill_toggle_restores_state(ops in prop::collection::vec(op(), 1..20), slot in 0_usize..8) {
        let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
        for op in &ops {
            apply(&mut engine, op);
        }
        if let Some(id) = engine.id_at(slot) {
            if engine.fill() != Some(id) {
                engine.set_fill(Some(id)).unwrap();
            }
            let before = engine.dump();
            engine.set_fill(Some(id)).unwrap();
            engine.set_fill(Some(id)).unwrap();
            let after = engine.dump();
            prop_assert_eq!(after.fill_index, before.fill_index);
            for (a, b) in after.ingredients.iter().zip(&before.ingredients) {
                prop_assert!((a.volume - b.volume).abs() < 0.1);
            }
        }
    }
}
