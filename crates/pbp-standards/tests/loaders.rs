use std::fs;
use std::path::{Path, PathBuf};

use pbp_model::{BpType, Sex};
use pbp_standards::hash::sha256_hex;
use pbp_standards::{ReferenceTableStore, StandardsError, TableRole};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bp-tables")
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "pbp-standards-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn copy_fixtures(dest: &Path) {
    for role in TableRole::ALL {
        let name = role.default_file_name();
        fs::copy(fixture_dir().join(name), dest.join(name)).unwrap();
    }
}

fn manifest_for(dir: &Path, roles: &[TableRole]) -> String {
    let mut out = String::from(
        "[manifest]\nschema = \"pbp.reference-tables\"\nschema_version = 1\n\n\
         [pins]\nguideline = \"synthetic fixture\"\n",
    );
    for role in roles {
        let name = role.default_file_name();
        let sha = sha256_hex(&fs::read(dir.join(name)).unwrap());
        out.push_str(&format!(
            "\n[[files]]\npath = \"{name}\"\nsha256 = \"{sha}\"\nrole = \"{role}\"\n"
        ));
    }
    out
}

#[test]
fn loads_conventional_files_without_manifest() {
    let (store, summary) = ReferenceTableStore::load_dir(&fixture_dir()).expect("load fixtures");
    assert_eq!(store.len(), 4);
    assert!(!summary.verified);
    assert_eq!(summary.age_group_count, 4 * 14);

    let table = store.get_table(Sex::Male, BpType::Systolic).unwrap();
    assert_eq!(table.source(), "MaleSBP.csv");
    assert_eq!(table.age_range(), Some((0, 13)));
    let band = table.age_group(10).unwrap().nearest(140.0).unwrap();
    assert_eq!(band.label, "50%");
    assert_eq!((band.bp_50, band.bp_95), (110.0, 122.0));
}

#[test]
fn manifest_pins_are_verified() {
    let dir = unique_temp_dir("pinned");
    copy_fixtures(&dir);
    fs::write(dir.join("manifest.toml"), manifest_for(&dir, &TableRole::ALL)).unwrap();

    let (store, summary) = ReferenceTableStore::load_dir(&dir).expect("load pinned");
    assert!(summary.verified);
    assert_eq!(summary.guideline.as_deref(), Some("synthetic fixture"));
    assert_eq!(store.len(), 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tampered_table_fails_checksum() {
    let dir = unique_temp_dir("tampered");
    copy_fixtures(&dir);
    fs::write(dir.join("manifest.toml"), manifest_for(&dir, &TableRole::ALL)).unwrap();
    let path = dir.join("FemaleDBP.csv");
    let mut contents = fs::read_to_string(&path).unwrap();
    contents.push_str("14,Height (cm),1,2,3,4,5,6,7\n");
    fs::write(&path, contents).unwrap();

    let err = ReferenceTableStore::load_dir(&dir).unwrap_err();
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }));
    assert!(err.is_integrity_error());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn manifest_must_cover_every_role() {
    let dir = unique_temp_dir("partial");
    copy_fixtures(&dir);
    let roles = [TableRole::MaleSystolic, TableRole::MaleDiastolic];
    fs::write(dir.join("manifest.toml"), manifest_for(&dir, &roles)).unwrap();

    let err = ReferenceTableStore::load_dir(&dir).unwrap_err();
    match err {
        StandardsError::MissingRole { role } => assert_eq!(role, "female_systolic"),
        other => panic!("unexpected error: {other}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn manifest_rejects_unknown_schema() {
    let dir = unique_temp_dir("schema");
    copy_fixtures(&dir);
    let manifest = manifest_for(&dir, &TableRole::ALL).replace("pbp.reference-tables", "other");
    fs::write(dir.join("manifest.toml"), manifest).unwrap();

    let err = ReferenceTableStore::load_dir(&dir).unwrap_err();
    assert!(err.to_string().contains("unsupported schema: other"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_without_manifest_is_reported() {
    let dir = unique_temp_dir("missing");
    copy_fixtures(&dir);
    fs::remove_file(dir.join("MaleDBP.csv")).unwrap();

    let err = ReferenceTableStore::load_dir(&dir).unwrap_err();
    match err {
        StandardsError::MissingFile { path } => assert!(path.ends_with("MaleDBP.csv")),
        other => panic!("unexpected error: {other}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn duplicate_tables_are_rejected() {
    let (store, _) = ReferenceTableStore::load_dir(&fixture_dir()).unwrap();
    let table = store.get_table(Sex::Female, BpType::Systolic).unwrap().clone();
    let err = ReferenceTableStore::from_tables(vec![table.clone(), table]).unwrap_err();
    assert!(matches!(err, StandardsError::DuplicateTable { .. }));
}
