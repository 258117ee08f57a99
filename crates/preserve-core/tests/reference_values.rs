//! Values published by the IPI calculator.
//!
//! These need tables generated from the real `dp.js`:
//! `preservation-calc generate`, then `cargo test -- --ignored`.

use preserve_core::{Calculator, MoistureContent, MoldRisk, PreservationIndex};
use preserve_tables::default_artifact_path;

fn calculator() -> Calculator {
    Calculator::from_artifact(&default_artifact_path()).expect("generated tables")
}

#[test]
#[ignore = "requires tables generated from dp.js"]
fn reference_cases() {
    let calc = calculator();
    let cases = [
        (-2.5, 45.5, 943, 9.2, 0),
        (-12.5, 24.0, 9124, 5.1, 0),
        (-6.5, 85.5, 483, 17.9, 0),
    ];
    for (t, rh, pi, emc, mold) in cases {
        assert_eq!(calc.pi(t, rh).unwrap(), PreservationIndex(pi), "pi({t}, {rh})");
        assert_eq!(calc.emc(t, rh).unwrap(), MoistureContent(emc), "emc({t}, {rh})");
        assert_eq!(calc.mold(t, rh).unwrap(), MoldRisk(mold), "mold({t}, {rh})");
    }
}

/// Room conditions: 20 °C, 50 % RH is rated at the edge of "OK" for natural aging.
#[test]
#[ignore = "requires tables generated from dp.js"]
fn room_conditions() {
    let calc = calculator();
    assert_eq!(calc.pi(20.0, 50.0).unwrap(), PreservationIndex(45));
    assert_eq!(calc.mold(20.0, 50.0).unwrap(), MoldRisk::NONE);
}

#[test]
#[ignore = "requires tables generated from dp.js"]
fn generated_tables_have_reference_shapes() {
    let calc = calculator();
    let tables = calc.tables();
    assert_eq!(tables.pi.shape(), (89, 90));
    assert_eq!(tables.emc.shape(), (86, 101));
    assert_eq!(tables.mold.shape(), (44, 36));
}
