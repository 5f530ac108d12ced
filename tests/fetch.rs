use nebukawa_bot::config::AppConfig;
use nebukawa_bot::http::Lr2Client;

fn offline_config() -> AppConfig {
    AppConfig {
        // RFC 2606 reserved TLD: resolution always fails, no live traffic.
        lr2ir_base_url: "http://nonexistent.invalid/search.cgi".to_string(),
        data_dir: "data".into(),
    }
}

#[test]
fn ranking_url_templates_the_course_id() {
    let client = Lr2Client::new(&offline_config()).unwrap();
    assert_eq!(
        client.ranking_url(13136),
        "http://nonexistent.invalid/search.cgi?mode=ranking&courseid=13136"
    );
}

#[tokio::test]
async fn unreachable_host_is_an_explicit_error() {
    let client = Lr2Client::new(&offline_config()).unwrap();
    assert!(client.fetch_ranking(13136).await.is_err());
}

#[tokio::test]
async fn legacy_contract_degrades_to_empty_instead_of_raising() {
    let client = Lr2Client::new(&offline_config()).unwrap();
    let rows = client.fetch_ranking_or_empty(13136).await;
    assert!(rows.is_empty());
}
