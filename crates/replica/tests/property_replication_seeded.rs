//! Seeded random-tree suite: the builder's core guarantees must hold for
//! arbitrary value shapes, and its writes must agree with plain path
//! assignment on a thawed clone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use replica::{
    deep_freeze, is_deep_frozen, thawed_clone, Object, ReplicationBuilder, Value,
};

fn random_value(rng: &mut StdRng, depth: u32) -> Value {
    let roll = rng.gen_range(0..100u32);
    if depth >= 4 || roll < 40 {
        match rng.gen_range(0..5u32) {
            0 => Value::Null,
            1 => Value::from(rng.gen_bool(0.5)),
            2 => Value::from(rng.gen_range(-1_000i64..1_000)),
            3 => Value::from(rng.gen_range(-10.0f64..10.0)),
            _ => Value::from(format!("s{}", rng.gen_range(0..10_000u32))),
        }
    } else if roll < 70 {
        let len = rng.gen_range(0..5usize);
        let items: Vec<Value> = (0..len).map(|_| random_value(rng, depth + 1)).collect();
        Value::from(items)
    } else {
        let len = rng.gen_range(0..5usize);
        let mut object = Object::new();
        for i in 0..len {
            object
                .insert(format!("k{}", i), random_value(rng, depth + 1))
                .expect("freshly built objects are thawed");
        }
        Value::from(object)
    }
}

/// A root that is always a container, so navigation has somewhere to go.
fn random_root(rng: &mut StdRng) -> Value {
    let mut object = Object::new();
    let len = rng.gen_range(1..6usize);
    for i in 0..len {
        object
            .insert(format!("root{}", i), random_value(rng, 1))
            .expect("freshly built objects are thawed");
    }
    Value::from(object)
}

/// Every path to an existing slot in the tree. Ancestors of each collected
/// path are containers by construction.
fn collect_slot_paths(value: &Value, base: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    match value {
        Value::Array(arr) => {
            for (index, item) in arr.iter().enumerate() {
                base.push(index.to_string());
                out.push(base.clone());
                collect_slot_paths(item, base, out);
                base.pop();
            }
        }
        Value::Object(obj) => {
            for (key, child) in obj.iter() {
                base.push(key.clone());
                out.push(base.clone());
                collect_slot_paths(child, base, out);
                base.pop();
            }
        }
        _ => {}
    }
}

/// Drive the fluent chain to write `value` at `path`.
fn write_via_builder(source: &Value, path: &[String], value: Value) -> Value {
    let builder = ReplicationBuilder::for_object(source);
    let (leaf, parents) = path.split_last().expect("paths are non-empty");
    if parents.is_empty() {
        return builder
            .replace_property(leaf.clone())
            .with(value)
            .expect("root-level write")
            .build();
    }
    let mut operator = builder
        .property(parents[0].clone())
        .expect("first navigation step");
    for step in &parents[1..] {
        operator = operator.property(step.clone()).expect("navigation step");
    }
    operator
        .replace_property(leaf.clone())
        .with(value)
        .expect("nested write")
        .build()
}

#[test]
fn noop_round_trip_over_random_trees() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let source = random_root(&mut rng);
        let output = ReplicationBuilder::for_object(&source).build();
        assert_eq!(output, source, "seed {}", seed);
    }
}

#[test]
fn freeze_propagates_over_random_trees() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plain = random_root(&mut rng);
        let frozen = deep_freeze(plain.clone());

        let output = ReplicationBuilder::for_object(&frozen).build();
        assert!(is_deep_frozen(&output), "seed {}", seed);
        assert_eq!(output, plain, "seed {}", seed);

        let thawed_output = ReplicationBuilder::for_object(&plain).build();
        assert!(!thawed_output.is_frozen(), "seed {}", seed);
    }
}

#[test]
fn builder_writes_agree_with_plain_path_assignment() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let source = random_root(&mut rng);

        let mut paths = Vec::new();
        collect_slot_paths(&source, &mut Vec::new(), &mut paths);
        if paths.is_empty() {
            continue;
        }
        // Every strict ancestor of a collected path is a container, so the
        // fluent navigation below cannot hit an invalid-path fault.
        let target = paths[rng.gen_range(0..paths.len())].clone();
        let replacement = Value::from(format!("replaced-{}", seed));

        let built = write_via_builder(&source, &target, replacement.clone());

        let mut expected = thawed_clone(&source);
        replica::path::set(&mut expected, &target, replacement)
            .expect("oracle write");

        assert_eq!(built, expected, "seed {} path {:?}", seed, target);

        // And the source itself never moves.
        let mut pristine_rng = StdRng::seed_from_u64(seed);
        assert_eq!(source, random_root(&mut pristine_rng), "seed {}", seed);
    }
}
