use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use preserve_model::round_half_up;
use preserve_tables::fixture::{emc_value, pi_value, synthetic_source};
use preserve_tables::hash::sha256_hex;
use preserve_tables::{
    ARTIFACT_SCHEMA, GenerateConfig, TableArtifact, TableSet, TablesError, artifact_checksum,
    build_artifact, generate, load_artifact, read_artifact, render_artifact, verify_artifact,
    write_artifact,
};
use proptest::prelude::*;
use tempfile::tempdir;

static ARTIFACT: LazyLock<TableArtifact> = LazyLock::new(|| {
    build_artifact(&synthetic_source(), "fixture://dp.js").expect("build fixture artifact")
});

fn summary_lines(tables: &TableSet) -> String {
    tables
        .summaries()
        .iter()
        .map(|s| {
            format!(
                "{} {}x{} t={}..={} rh={}..={} {}",
                s.kind,
                s.rows,
                s.cols,
                s.temperature.0,
                s.temperature.1,
                s.humidity.0,
                s.humidity.1,
                s.policy
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn edit_json(path: &Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    edit(&mut value);
    fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
}

#[test]
fn write_then_load_preserves_lookups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/dp_tables.json");

    write_artifact(&path, &ARTIFACT).unwrap();
    let tables = load_artifact(&path).unwrap();

    assert_eq!(tables, ARTIFACT.tables);
    assert_eq!(tables.pi.get(0, 50).unwrap(), pi_value(0, 50));
    assert_eq!(tables.emc.get(33, 77).unwrap(), emc_value(33, 77));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn failed_rename_removes_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dp_tables.json");
    // A non-empty directory cannot be replaced by a file.
    fs::create_dir_all(path.join("occupied")).unwrap();

    let err = write_artifact(&path, &ARTIFACT).unwrap_err();
    assert!(
        matches!(err, TablesError::Io { operation: "rename", .. }),
        "{err}"
    );
    assert!(!path.with_extension("json.tmp").exists());
    assert!(path.is_dir());
}

#[test]
fn rendering_is_deterministic() {
    let first = render_artifact(&ARTIFACT).unwrap();
    let rebuilt = build_artifact(&synthetic_source(), "fixture://dp.js").unwrap();
    assert_eq!(first, render_artifact(&rebuilt).unwrap());
    assert!(first.ends_with("}\n"));

    let dir = tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    write_artifact(&a, &ARTIFACT).unwrap();
    write_artifact(&b, &rebuilt).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());

    let checksum = artifact_checksum(&ARTIFACT).unwrap();
    assert_eq!(checksum, sha256_hex(&fs::read(&a).unwrap()));
}

#[test]
fn artifact_header_fields() {
    let value = serde_json::to_value(&*ARTIFACT).unwrap();
    assert_eq!(value["schema"], ARTIFACT_SCHEMA);
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["initialized"], true);
    assert_eq!(value["source"]["url"], "fixture://dp.js");
    assert_eq!(
        value["source"]["sha256"],
        sha256_hex(synthetic_source().as_bytes())
    );
    assert_eq!(value["tables"]["mold"]["policy"], "raise");
    assert_eq!(value["tables"]["emc"]["rows"][0][1], 0.1);
}

#[test]
fn missing_artifact_is_not_generated() {
    let dir = tempdir().unwrap();
    let err = load_artifact(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TablesError::NotGenerated { .. }));
}

#[test]
fn placeholder_artifact_is_not_generated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dp_tables.json");
    fs::write(
        &path,
        r#"{"schema":"preservation-calc.tables","schema_version":1,"initialized":false}"#,
    )
    .unwrap();
    let err = load_artifact(&path).unwrap_err();
    assert!(
        matches!(err, TablesError::NotGenerated { ref reason, .. } if reason.contains("placeholder"))
    );
}

#[test]
fn unknown_schema_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dp_tables.json");
    write_artifact(&path, &ARTIFACT).unwrap();
    edit_json(&path, |value| value["schema_version"] = 2.into());

    let err = load_artifact(&path).unwrap_err();
    assert!(matches!(
        err,
        TablesError::SchemaMismatch {
            found_version: 2,
            expected_version: 1,
            ..
        }
    ));
}

#[test]
fn tampered_policy_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dp_tables.json");
    write_artifact(&path, &ARTIFACT).unwrap();
    edit_json(&path, |value| value["tables"]["mold"]["policy"] = "clamp".into());

    let err = load_artifact(&path).unwrap_err();
    assert!(err.to_string().contains("boundary policy is clamp"), "{err}");
}

#[test]
fn truncated_rows_fail_to_decode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dp_tables.json");
    write_artifact(&path, &ARTIFACT).unwrap();
    edit_json(&path, |value| {
        value["tables"]["pi"]["rows"]
            .as_array_mut()
            .unwrap()
            .pop();
    });

    let err = read_artifact(&path).unwrap_err();
    assert!(matches!(err, TablesError::Json { .. }));
}

#[test]
fn generate_from_local_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("dp.js");
    fs::write(&source, synthetic_source()).unwrap();
    let output = dir.path().join("tables/dp_tables.json");

    let config = GenerateConfig::default()
        .with_source_path(&source)
        .with_output(&output);
    let report = generate(&config).unwrap();

    assert_eq!(report.output, output);
    assert_eq!(report.source.bytes, synthetic_source().len());
    assert_eq!(report.checksum, sha256_hex(&fs::read(&output).unwrap()));

    let verified = verify_artifact(&output).unwrap();
    assert_eq!(verified.checksum, report.checksum);
    assert_eq!(verified.cell_count, 18280);

    insta::assert_snapshot!(summary_lines(&load_artifact(&output).unwrap()), @r"
    pi 89x90 t=-23..=65 rh=6..=95 clamp
    emc 86x101 t=-20..=65 rh=0..=100 clamp
    mold 44x36 t=2..=45 rh=65..=100 raise
    ");
}

#[test]
fn generate_reports_missing_source_file() {
    let dir = tempdir().unwrap();
    let config = GenerateConfig::default()
        .with_source_path(dir.path().join("missing.js"))
        .with_output(dir.path().join("out.json"));
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, TablesError::Io { .. }));
    assert!(!dir.path().join("out.json").exists());
}

proptest! {
    #[test]
    fn pi_lookup_matches_rounded_cell(t in -23.0f64..=65.0, rh in 6.0f64..=95.0) {
        let expected = pi_value(round_half_up(t), round_half_up(rh));
        prop_assert_eq!(ARTIFACT.tables.pi.lookup(t, rh).unwrap(), expected);
    }
}
