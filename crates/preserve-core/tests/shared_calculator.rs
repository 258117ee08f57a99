//! The default calculator is process-wide, so these tests live in their own
//! binary.

use preserve_core::{Calculator, CoreError, MoistureContent, MoldRisk, PreservationIndex};
use preserve_tables::build_artifact;
use preserve_tables::fixture::{emc_value, pi_value, synthetic_source};

#[test]
fn free_functions_use_installed_default() {
    let artifact = build_artifact(&synthetic_source(), "fixture://dp.js").unwrap();
    let calculator = Calculator::new(artifact.tables);
    assert!(preserve_core::install_default(calculator.clone()).is_ok());
    assert!(preserve_core::install_default(calculator).is_err());

    assert_eq!(
        preserve_core::pi(10.0, 40.0).unwrap(),
        PreservationIndex(pi_value(10, 40))
    );
    assert_eq!(
        preserve_core::emc(10.0, 40.0).unwrap(),
        MoistureContent(emc_value(10, 40))
    );
    assert_eq!(preserve_core::mold(10.0, 40.0).unwrap(), MoldRisk::NONE);

    let err = preserve_core::pi(-25.0, 40.0).unwrap_err();
    assert!(matches!(err, CoreError::Preservation(_)));
    assert!(err.as_index_range().is_some());
}
