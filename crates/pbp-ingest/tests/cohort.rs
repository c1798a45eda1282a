use std::io::Write;
use std::path::Path;

use pbp_ingest::{Cohort, IngestError};
use pbp_model::{BpType, Sex};
use tempfile::NamedTempFile;

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

const CLEAN: &str = "\
SEQN,RIDAGEYR,RIAGENDR,BMXHT,BMXWT,BPXSY1,BPXDI1
83734.0,10.0,1.0,140.2,35.1,116.0,62.0
83732.0,7.0,2.0,121.5,24.0,98.0,58.0
83733.0,45.0,1.0,176.0,80.0,128.0,80.0
83735.0,5.0,2.0,108.0,18.0,,56.0
83736.0,9.0,3.0,130.0,27.0,104.0,60.0
,8.0,1.0,128.0,25.0,100.0,60.0
";

#[test]
fn loads_pediatric_respondents_sorted() {
    let file = temp_csv(CLEAN);
    let cohort = Cohort::load(file.path()).unwrap();
    let ids: Vec<u64> = cohort.ids().collect();
    assert_eq!(ids, vec![83732, 83734, 83735, 83736]);
    assert_eq!(cohort.len(), 4);
}

#[test]
fn complete_record_builds_both_subjects() {
    let file = temp_csv(CLEAN);
    let cohort = Cohort::load(file.path()).unwrap();
    let [systolic, diastolic] = cohort.get(83734).unwrap().subjects().unwrap();
    assert_eq!(systolic.sex, Sex::Male);
    assert_eq!(systolic.bp_type, BpType::Systolic);
    assert_eq!(systolic.bp_value_mmhg, 116.0);
    assert_eq!(diastolic.bp_type, BpType::Diastolic);
    assert_eq!(diastolic.bp_value_mmhg, 62.0);
    assert_eq!(diastolic.height_cm, 140.2);
}

#[test]
fn missing_systolic_is_reported() {
    let file = temp_csv(CLEAN);
    let cohort = Cohort::load(file.path()).unwrap();
    let err = cohort.get(83735).unwrap().complete().unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingMeasurement {
            seqn: 83735,
            field: "BPXSY1"
        }
    ));
}

#[test]
fn unknown_gender_code_is_invalid() {
    let file = temp_csv(CLEAN);
    let cohort = Cohort::load(file.path()).unwrap();
    let err = cohort.get(83736).unwrap().subjects().unwrap_err();
    assert!(err.to_string().contains("RIAGENDR"));
}

#[test]
fn adults_are_not_in_the_cohort() {
    let file = temp_csv(CLEAN);
    let cohort = Cohort::load(file.path()).unwrap();
    assert!(matches!(
        cohort.get(83733),
        Err(IngestError::UnknownRespondent { seqn: 83733 })
    ));
}

#[test]
fn missing_column_fails_load() {
    let file = temp_csv("SEQN,RIDAGEYR,RIAGENDR,BMXHT,BPXSY1\n1,5,1,110,100\n");
    let err = Cohort::load(file.path()).unwrap_err();
    match err {
        IngestError::MissingColumn { column, .. } => assert_eq!(column, "BPXDI1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_not_found() {
    let err = Cohort::load(Path::new("/nonexistent/nhanes_clean.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn duplicate_seqn_keeps_first_row() {
    let file = temp_csv(
        "SEQN,RIDAGEYR,RIAGENDR,BMXHT,BPXSY1,BPXDI1\n\
         10,6,1,115,101,60\n\
         10,6,1,115,140,90\n",
    );
    let cohort = Cohort::load(file.path()).unwrap();
    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort.get(10).unwrap().systolic_mmhg, Some(101.0));
}
