use std::io::Write;

use nebukawa_bot::course_data::{CourseDataIndex, CourseDataRoot};

fn sample_json() -> serde_json::Value {
    serde_json::json!({
        "courses": [
            {
                "round": 12,
                "title": "Weekly Chart",
                "diff": "ANOTHER",
                "course_id": 13136,
                "bmsid": "450",
                "average_score": 5000.0,
                "top_score": 5800.0,
                "theoretical_score": 6000.0,
                "optimized_p": 1.0
            },
            {
                "round": 13,
                "title": "Weekly Chart 2",
                "course_id": 13200,
                "bmsid": "451",
                "average_score": 4000.0,
                "top_score": 4700.0,
                "theoretical_score": 5000.0,
                "optimized_p": 1.175
            }
        ]
    })
}

fn sample_index() -> CourseDataIndex {
    let root: CourseDataRoot = serde_json::from_value(sample_json()).unwrap();
    CourseDataIndex::from_root(root)
}

#[test]
fn load_from_path_and_lookup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", sample_json()).unwrap();

    let index = CourseDataIndex::load_from_path(file.path()).unwrap();
    assert_eq!(index.courses().len(), 2);

    let entry = index.by_course_id(13136).unwrap();
    assert_eq!(entry.round, 12);
    assert_eq!(entry.title, "Weekly Chart");
    assert_eq!(entry.diff.as_deref(), Some("ANOTHER"));

    let entry = index.by_bmsid("451").unwrap();
    assert_eq!(entry.course_id, 13200);
    assert!(index.by_course_id(99999).is_none());
    assert!(index.by_bmsid("999").is_none());
}

#[test]
fn reference_scores_are_flattened_into_the_entry() {
    let index = sample_index();
    let reference = index.by_bmsid("450").unwrap().reference;

    assert_eq!(reference.average_score, 5000.0);
    assert_eq!(reference.top_score, 5800.0);
    assert_eq!(reference.theoretical_score, 6000.0);
    assert_eq!(reference.optimized_p, 1.0);
}

#[test]
fn optional_diff_defaults_to_none() {
    let index = sample_index();
    assert!(index.by_course_id(13200).unwrap().diff.is_none());
}

#[test]
fn duplicate_keys_keep_the_first_entry() {
    let mut json = sample_json();
    json["courses"][1]["course_id"] = serde_json::json!(13136);
    json["courses"][1]["bmsid"] = serde_json::json!("450");

    let root: CourseDataRoot = serde_json::from_value(json).unwrap();
    let index = CourseDataIndex::from_root(root);

    assert_eq!(index.by_course_id(13136).unwrap().round, 12);
    assert_eq!(index.by_bmsid("450").unwrap().round, 12);
}

#[test]
fn missing_file_is_an_error() {
    let path = std::path::Path::new("does/not/exist/courses.json");
    assert!(CourseDataIndex::load_from_path(path).is_err());
}

#[test]
fn course_data_round_trips_through_json() {
    let root: CourseDataRoot = serde_json::from_value(sample_json()).unwrap();
    let serialized = serde_json::to_value(&root).unwrap();
    let reparsed: CourseDataRoot = serde_json::from_value(serialized).unwrap();

    assert_eq!(reparsed.courses.len(), 2);
    assert_eq!(reparsed.courses[0].bmsid, "450");
    assert_eq!(reparsed.courses[0].reference.optimized_p, 1.0);
}
