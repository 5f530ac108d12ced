use std::path::PathBuf;

use nebukawa_bot::http::decode_cp932;
use nebukawa_bot::lr2ir::models::find_player;
use nebukawa_bot::lr2ir::parse::{parse_course_bmsid, parse_ranking_html};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

#[test]
fn parse_ranking_fixture() {
    let html = load_fixture("course_ranking.html");
    let rows = parse_ranking_html(&html).unwrap();

    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].player_id, "30198");
    assert_eq!(rows[0].player_name, "DOLCE.");
    assert_eq!(rows[0].score, "5555/5678(97.83%)");
    assert_eq!(rows[0].pg, 2500);
    assert_eq!(rows[0].gr, 555);

    // Tied ranks are carried through as-is.
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[2].rank, 2);
    assert_eq!(rows[1].player_id, "12345");
    assert_eq!(rows[2].player_id, "67890");
}

#[test]
fn every_returned_row_has_a_player_id() {
    let html = load_fixture("course_ranking.html");
    let rows = parse_ranking_html(&html).unwrap();

    assert!(rows.iter().all(|row| !row.player_id.is_empty()));
    // The linkless "ghost" row is dropped, not returned with a null id.
    assert!(rows.iter().all(|row| row.player_name != "ghost"));
}

#[test]
fn rows_with_empty_score_cell_are_dropped() {
    let html = load_fixture("course_ranking.html");
    let rows = parse_ranking_html(&html).unwrap();

    assert!(rows.iter().all(|row| row.player_id != "99999"));
}

#[test]
fn score_cell_accessors() {
    let html = load_fixture("course_ranking.html");
    let rows = parse_ranking_html(&html).unwrap();

    assert_eq!(rows[0].ex_score(), Some(5555));
    assert_eq!(rows[0].max_score(), Some(5678));
    assert_eq!(rows[0].score_rate(), Some(97.83));
}

#[test]
fn bmsid_extracted_from_course_link() {
    let html = load_fixture("course_ranking.html");
    assert_eq!(parse_course_bmsid(&html), Some("450".to_string()));
}

#[test]
fn header_only_table_is_zero_participants_not_an_error() {
    let html = load_fixture("course_ranking_empty.html");
    let rows = parse_ranking_html(&html).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn too_few_tables_is_an_error() {
    let html = "<html><body><table><tr><td>only one</td></tr></table></body></html>";
    assert!(parse_ranking_html(html).is_err());
}

#[test]
fn unexpected_header_layout_is_an_error() {
    let html = r#"<html><body>
        <table><tr><td>1</td></tr></table>
        <table><tr><td>2</td></tr></table>
        <table><tr><td>3</td></tr></table>
        <table><tr><th>Rank</th><th>Name</th></tr><tr><td>1</td><td>x</td></tr></table>
        </body></html>"#;
    assert!(parse_ranking_html(html).is_err());
}

#[test]
fn find_player_matches_by_id() {
    let html = load_fixture("course_ranking.html");
    let rows = parse_ranking_html(&html).unwrap();

    let row = find_player(&rows, "12345").unwrap();
    assert_eq!(row.player_name, "nebukawa");
    assert!(find_player(&rows, "00000").is_none());
}

#[test]
fn decode_cp932_decodes_shift_jis_bytes() {
    // 0x82 0xA0 is hiragana "a" in cp932.
    assert_eq!(decode_cp932(&[0x82, 0xA0]), "あ");
    assert_eq!(decode_cp932(b"<html>plain ascii</html>"), "<html>plain ascii</html>");
}
