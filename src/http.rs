use eyre::WrapErr;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::warn;

use crate::config::AppConfig;
use crate::lr2ir::models::RankingRow;
use crate::lr2ir::parse::{parse_course_bmsid, parse_ranking_html};

/// LR2IR search CGI. Rankings are `?mode=ranking&courseid=<id>` on this URL.
pub const LR2IR_SEARCH_URL: &str = "http://www.dream-pro.info/~lavalse/LR2IR/search.cgi";

#[derive(Debug, Clone)]
pub struct Lr2Client {
    base_url: String,
    client: reqwest::Client,
}

impl Lr2Client {
    pub fn new(config: &AppConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers()?)
            .build()
            .wrap_err("build reqwest client")?;

        Ok(Self {
            base_url: config.lr2ir_base_url.clone(),
            client,
        })
    }

    pub fn ranking_url(&self, course_id: u32) -> String {
        format!("{}?mode=ranking&courseid={}", self.base_url, course_id)
    }

    /// Fetch a course ranking page and decode it from cp932.
    ///
    /// One live GET per call, no caching, no retries, no internal timeout;
    /// callers own cancellation and backoff.
    pub async fn fetch_ranking_page(&self, course_id: u32) -> eyre::Result<String> {
        let url = self.ranking_url(course_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err("GET ranking page")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(eyre::eyre!("non-success status: {status} url={url}"));
        }
        let bytes = resp.bytes().await.wrap_err("read ranking page bytes")?;
        Ok(decode_cp932(&bytes))
    }

    /// Fetch and parse a course ranking.
    ///
    /// `Err` means the fetch or the page layout failed; `Ok(vec![])` means
    /// the course genuinely has no participants. Callers that want the old
    /// degrade-to-empty contract use [`Self::fetch_ranking_or_empty`].
    pub async fn fetch_ranking(&self, course_id: u32) -> eyre::Result<Vec<RankingRow>> {
        let html = self.fetch_ranking_page(course_id).await?;
        parse_ranking_html(&html).wrap_err("parse ranking page")
    }

    /// Legacy contract: any fetch or parse failure collapses to an empty
    /// row list (logged, never propagated).
    pub async fn fetch_ranking_or_empty(&self, course_id: u32) -> Vec<RankingRow> {
        match self.fetch_ranking(course_id).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!("ranking fetch failed for course {course_id}: {err:#}");
                Vec::new()
            }
        }
    }

    /// Fetch the ranking page and extract the linked chart's bmsid, the key
    /// into the course reference table.
    pub async fn fetch_course_bmsid(&self, course_id: u32) -> eyre::Result<Option<String>> {
        let html = self.fetch_ranking_page(course_id).await?;
        Ok(parse_course_bmsid(&html))
    }
}

/// The LR2IR CGI serves cp932 with no charset header; decode before parsing.
/// encoding_rs's SHIFT_JIS table is the Windows-31J-compatible one.
pub fn decode_cp932(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::SHIFT_JIS.decode(bytes);
    text.into_owned()
}

fn default_headers() -> eyre::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("ja,en-US;q=0.9,en;q=0.8"),
    );
    Ok(headers)
}
