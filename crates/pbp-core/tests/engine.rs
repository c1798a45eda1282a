use std::path::PathBuf;

use pbp_core::{
    ErrorKind, PercentileEngine, PercentileError, ScreeningRequest, classify, compute_percentile,
    screen,
};
use pbp_model::{BpStatus, BpType, Sex, Subject};
use pbp_standards::{AgeGroup, HeightBand, ReferenceTable, ReferenceTableStore};

fn fixture_store() -> ReferenceTableStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../pbp-standards/tests/fixtures/bp-tables");
    let (store, _) = ReferenceTableStore::load_dir(&dir).expect("load fixture tables");
    store
}

/// One male systolic table with a single age group at heights 100/110/120.
fn three_band_store() -> ReferenceTableStore {
    let group = AgeGroup::new(
        6,
        vec![
            HeightBand::new("short", 100.0, 95.0, 108.0),
            HeightBand::new("mid", 110.0, 98.0, 111.0),
            HeightBand::new("tall", 120.0, 101.0, 114.0),
        ],
    )
    .unwrap();
    let table = ReferenceTable::new(Sex::Male, BpType::Systolic, "synthetic", vec![group]).unwrap();
    ReferenceTableStore::from_tables(vec![table]).unwrap()
}

fn subject(sex: Sex, bp_type: BpType, age: f64, height: f64, bp: f64) -> Subject {
    Subject::new(sex, bp_type, age, height, bp).expect("valid subject")
}

#[test]
fn worked_example_male_age_ten() {
    let store = fixture_store();
    let result = compute_percentile(
        &store,
        &subject(Sex::Male, BpType::Systolic, 10.0, 140.0, 116.0),
    )
    .unwrap();
    assert_eq!(result.cell.bp_50, 110.0);
    assert_eq!(result.cell.bp_95, 122.0);
    assert!((result.cell.sigma - 7.29).abs() < 0.01);
    assert!((result.z_score - 0.8225).abs() < 0.001);
    assert!((result.percentile - 79.5).abs() < 0.1, "got {}", result.percentile);
    assert_eq!(result.status, BpStatus::Normal);
}

#[test]
fn exact_anchors_give_50_and_95() {
    let store = fixture_store();
    let engine = PercentileEngine::new(&store);
    let at_median = engine
        .compute_percentile(&subject(Sex::Female, BpType::Diastolic, 4.0, 100.6, 50.0))
        .unwrap();
    assert_eq!(at_median.cell.bp_50, 50.0);
    assert!((at_median.percentile - 50.0).abs() < 1e-9);

    let cell = at_median.cell;
    let at_95 = engine
        .compute_percentile(&subject(
            Sex::Female,
            BpType::Diastolic,
            4.0,
            100.6,
            cell.bp_95,
        ))
        .unwrap();
    assert!((at_95.percentile - 95.0).abs() < 0.01);
}

#[test]
fn nearest_height_resolves_107_to_110() {
    let store = three_band_store();
    let engine = PercentileEngine::new(&store);
    let cell = engine
        .resolve_cell(&subject(Sex::Male, BpType::Systolic, 6.0, 107.0, 100.0))
        .unwrap();
    assert_eq!(cell.height_cm, 110.0);
    assert_eq!(cell.band, "mid");

    let tie = engine
        .resolve_cell(&subject(Sex::Male, BpType::Systolic, 6.0, 115.0, 100.0))
        .unwrap();
    assert_eq!(tie.band, "mid");
}

#[test]
fn missing_combination_is_configuration_error() {
    let store = three_band_store();
    let err = compute_percentile(
        &store,
        &subject(Sex::Female, BpType::Systolic, 6.0, 110.0, 100.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!err.is_user_error());
}

#[test]
fn unknown_sex_string_is_configuration_error() {
    let err: PercentileError = "Other".parse::<Sex>().unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("unknown sex 'Other'"));
}

#[test]
fn age_twenty_is_out_of_range() {
    let store = fixture_store();
    let err = compute_percentile(
        &store,
        &subject(Sex::Male, BpType::Systolic, 20.0, 170.0, 120.0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(err.is_user_error());
    assert!(err.to_string().contains("0-13 years"));
}

#[test]
fn fractional_age_rounds_into_group() {
    let store = fixture_store();
    let engine = PercentileEngine::new(&store);
    let cell = engine
        .resolve_cell(&subject(Sex::Male, BpType::Systolic, 13.4, 160.0, 120.0))
        .unwrap();
    assert_eq!(cell.age_years, 13);
    let err = engine
        .resolve_cell(&subject(Sex::Male, BpType::Systolic, 13.5, 160.0, 120.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn age_in_months_matches_age_in_years() {
    let store = fixture_store();
    let by_months =
        Subject::from_age_months(Sex::Female, BpType::Systolic, 96.0, 126.0, 104.0).unwrap();
    let by_years = subject(Sex::Female, BpType::Systolic, 8.0, 126.0, 104.0);
    let a = compute_percentile(&store, &by_months).unwrap();
    let b = compute_percentile(&store, &by_years).unwrap();
    assert_eq!(a.percentile, b.percentile);
}

#[test]
fn invalid_measurement_fails_fast() {
    let store = fixture_store();
    let bad = Subject {
        sex: Sex::Male,
        bp_type: BpType::Diastolic,
        age_years: 5.0,
        height_cm: -110.0,
        bp_value_mmhg: 60.0,
    };
    let err = compute_percentile(&store, &bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn classification_boundaries() {
    assert_eq!(classify(90.0), BpStatus::Normal);
    assert_eq!(classify(95.0), BpStatus::Elevated);
    assert_eq!(classify(95.01), BpStatus::Hypertension);
}

#[test]
fn screening_reports_both_readings() {
    let store = fixture_store();
    let request = ScreeningRequest {
        sex: Sex::Male,
        age_years: 10.0,
        height_cm: 140.0,
        systolic_mmhg: 130.0,
        diastolic_mmhg: 55.0,
    };
    let report = screen(&store, &request).unwrap();
    assert_eq!(report.systolic.status, BpStatus::Hypertension);
    assert_eq!(report.diastolic.status, BpStatus::Normal);
    assert_eq!(report.overall_status(), BpStatus::Hypertension);
    assert_eq!(
        report.statuses(),
        vec![BpStatus::Normal, BpStatus::Hypertension]
    );

    assert_eq!(report.points.len(), 2);
    assert_eq!(report.points[0].bp_type, "Systolic BP");
    assert_eq!(report.points[0].color, "red");
    assert_eq!(report.points[1].color, "darkgreen");
    assert_eq!(report.reference_lines.len(), 3);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["systolic"]["status"], "Hypertension");
    assert_eq!(json["reference_lines"][2]["label"], "95th");
}

#[test]
fn screening_rejects_zero_reading() {
    let store = fixture_store();
    let request = ScreeningRequest {
        sex: Sex::Female,
        age_years: 3.0,
        height_cm: 95.0,
        systolic_mmhg: 0.0,
        diastolic_mmhg: 60.0,
    };
    let err = screen(&store, &request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
