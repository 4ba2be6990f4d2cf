//! Pinned output of the default generator for fixed seeds.
//!
//! Any change to pass order, draw count, or ranges shows up here as a
//! changed field. Update the literals only when the change is intended.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scout_field::{FieldGenerator, FieldParams};

const SEED_42_FIELD: [[f64; 10]; 7] = [
    [31.0, 34.0, 31.0, 31.0, 28.0, 25.0, 27.0, 33.0, 33.0, 26.0],
    [28.0, 34.0, 33.0, 30.0, 29.0, 24.0, 28.0, 29.0, 29.0, 26.0],
    [26.0, 31.0, 24.0, 18.0, 27.0, 29.0, 29.0, 31.0, 31.0, 31.0],
    [21.0, 22.0, 26.0, 32.0, 33.0, 27.0, 25.0, 29.0, 26.0, 33.0],
    [29.0, 20.0, 29.0, 31.0, 32.0, 28.0, 30.0, 28.0, 29.0, 29.0],
    [32.0, 26.0, 26.0, 23.0, 25.0, 29.0, 30.0, 32.0, 29.0, 26.0],
    [30.0, 33.0, 26.0, 20.0, 27.0, 23.0, 29.0, 29.0, 23.0, 27.0],
];

const SEED_42_SINGLE_VALUES: [f64; 8] = [33.0, 35.0, 30.0, 33.0, 28.0, 26.0, 26.0, 35.0];

fn generator() -> FieldGenerator {
    FieldGenerator::new(FieldParams::default()).unwrap()
}

#[test]
fn seed_42_field_is_pinned() {
    let grid = generator()
        .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(42))
        .unwrap();
    let expected: Vec<Vec<f64>> = SEED_42_FIELD.iter().map(|row| row.to_vec()).collect();
    assert_eq!(grid.to_rows(), expected);
}

#[test]
fn seed_42_single_values_are_pinned() {
    let generator = generator();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let drawn: Vec<f64> = (0..SEED_42_SINGLE_VALUES.len())
        .map(|_| generator.generate_single_value(&mut rng))
        .collect();
    assert_eq!(drawn, SEED_42_SINGLE_VALUES);
}
