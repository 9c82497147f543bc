//! Checks on the embedded supported-child records.

use child_directory::{Gender, supported_children};

#[test]
fn every_record_has_a_school_and_a_goal() {
    for child in supported_children() {
        assert!(!child.school.school.is_empty(), "child {} has no school", child.id);
        assert!(
            !child.future_educational_goals.is_empty(),
            "child {} has no goal",
            child.id
        );
    }
}

#[test]
fn first_record_matches_seed_data() {
    let children = supported_children();
    let first = children.first().expect("at least one record");
    assert_eq!(first.full_name(), "Amani Otieno");
    assert_eq!(first.gender, Gender::Female);
    assert_eq!(first.date_of_birth.to_string(), "2015-03-14");
    assert!(first.medical_support);
}

#[test]
fn records_round_trip_through_json() {
    let children = supported_children();
    let json = serde_json::to_value(&children).expect("serialize");
    assert_eq!(json[1]["school"]["level"], "Class 6");
    assert_eq!(json[2]["gender"], "female");
}
