//! Boundary behaviour of `LookupTable` across policies.

use preserve_model::{BoundaryPolicy, LookupTable, PreservationError, round_half_up};
use proptest::prelude::*;

/// Table shaped like the reference PI table, values encode their own index.
fn pi_like(policy: BoundaryPolicy) -> LookupTable<i32> {
    let data = (0..89 * 90).collect();
    LookupTable::new(data, -23..=65, 6..=95, policy).expect("pi-like table")
}

#[test]
fn clamp_edges_repeat_the_outermost_cells() {
    let table = pi_like(BoundaryPolicy::Clamp);
    for col in 6..=95 {
        assert_eq!(table.get(-24, col).unwrap(), table.get(-23, col).unwrap());
        assert_eq!(table.get(66, col).unwrap(), table.get(65, col).unwrap());
    }
    for row in -23..=65 {
        assert_eq!(table.get(row, 5).unwrap(), table.get(row, 6).unwrap());
        assert_eq!(table.get(row, 96).unwrap(), table.get(row, 95).unwrap());
    }
}

#[test]
fn raise_rejects_one_past_each_edge() {
    let table = pi_like(BoundaryPolicy::Raise);
    assert!(table.get(-24, 50).unwrap_err().is_temperature_error());
    assert!(table.get(66, 50).unwrap_err().is_temperature_error());
    assert!(table.get(0, 5).unwrap_err().is_humidity_error());
    assert!(table.get(0, 96).unwrap_err().is_humidity_error());
}

#[test]
fn temperature_is_checked_before_humidity() {
    let table = pi_like(BoundaryPolicy::Raise);
    let err = table.get(100, 100).unwrap_err();
    assert!(err.is_temperature_error());
}

#[test]
fn mold_like_table_rejects_fractional_overshoot() {
    let table = LookupTable::new(vec![7; 44 * 36], 2..=45, 65..=100, BoundaryPolicy::Raise)
        .expect("mold-like table");
    assert!(!table.contains(45.4, 80.0));
    assert!(table.lookup(45.4, 80.0).is_err());
    assert!(!table.contains(10.0, 64.9));
    assert_eq!(table.lookup(44.6, 99.5).unwrap(), 7);
}

#[test]
fn shape_mismatch_reports_counts() {
    let err = LookupTable::new(vec![0.0; 10], 0..=2, 0..=3, BoundaryPolicy::Clamp).unwrap_err();
    assert_eq!(
        err,
        PreservationError::ShapeMismatch {
            rows: 3,
            cols: 4,
            expected: 12,
            actual: 10,
        }
    );
}

#[test]
fn deserialize_revalidates_shape() {
    let json = r#"{"temperature":[0,1],"humidity":[0,1],"policy":"clamp","rows":[[1,2],[3]]}"#;
    let err = serde_json::from_str::<LookupTable<i32>>(json).unwrap_err();
    assert!(err.to_string().contains("shape mismatch"), "{err}");

    // Right number of values, wrong row lengths.
    let json = r#"{"temperature":[0,1],"humidity":[0,1],"policy":"clamp","rows":[[1,2,3],[4]]}"#;
    let err = serde_json::from_str::<LookupTable<i32>>(json).unwrap_err();
    assert!(err.to_string().contains("row 0 has 3 values"), "{err}");

    let json = r#"{"temperature":[0,1],"humidity":[0,1],"policy":"clamp","rows":[[1,2,3,4]]}"#;
    let err = serde_json::from_str::<LookupTable<i32>>(json).unwrap_err();
    assert!(err.to_string().contains("shape mismatch"), "{err}");
}

proptest! {
    #[test]
    fn lookup_equals_get_of_rounded_index(t in -23.0f64..=65.0, rh in 6.0f64..=95.0) {
        let table = pi_like(BoundaryPolicy::Raise);
        let expected = table.get(round_half_up(t), round_half_up(rh));
        prop_assert_eq!(table.lookup(t, rh), expected);
    }

    #[test]
    fn clamp_never_fails_for_finite_input(t in -1.0e6f64..1.0e6, rh in -1.0e6f64..1.0e6) {
        let table = pi_like(BoundaryPolicy::Clamp);
        let value = table.lookup(t, rh).unwrap();
        let t_pinned = t.clamp(-23.0, 65.0);
        let rh_pinned = rh.clamp(6.0, 95.0);
        prop_assert_eq!(value, table.lookup(t_pinned, rh_pinned).unwrap());
    }

    #[test]
    fn raise_errors_exactly_outside_declared_range(t in -40.0f64..80.0, rh in 0.0f64..100.0) {
        let table = pi_like(BoundaryPolicy::Raise);
        prop_assert_eq!(table.lookup(t, rh).is_ok(), table.contains(t, rh));
    }

    #[test]
    fn round_half_up_is_floor_of_shifted_value(v in -1000.0f64..1000.0) {
        let rounded = round_half_up(v);
        prop_assert!((f64::from(rounded) - v).abs() <= 0.5);
        if (v.fract().abs() - 0.5).abs() < f64::EPSILON {
            prop_assert!(f64::from(rounded) > v);
        }
    }
}
