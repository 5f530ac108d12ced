use serde::{Deserialize, Serialize};

use crate::lr2ir::bpi::{course_bpi, MIN_POW_COEF};

/// One participant row from an LR2IR course ranking table.
///
/// Rows are kept in page order (rank-ascending in practice); ties share a
/// rank value. `score` is the raw cell text, `"<ex>/<max>(<rate>%)"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: u32,
    pub player_id: String,
    pub player_name: String,
    pub score: String,
    pub pg: u32,
    pub gr: u32,
}

impl RankingRow {
    /// Achieved EX score: the integer before the `/` in the score cell.
    pub fn ex_score(&self) -> Option<u32> {
        let (ex, _) = self.score.split_once('/')?;
        ex.trim().parse().ok()
    }

    /// Maximum EX score for the chart: the integer after the `/`.
    pub fn max_score(&self) -> Option<u32> {
        let (_, rest) = self.score.split_once('/')?;
        let digits: String = rest
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Score rate percentage, the parenthesized part of the score cell.
    pub fn score_rate(&self) -> Option<f64> {
        let start = self.score.find('(')? + 1;
        let end = self.score.find('%')?;
        self.score.get(start..end)?.trim().parse().ok()
    }
}

/// Look up one player's row in a fetched ranking.
pub fn find_player<'a>(rows: &'a [RankingRow], player_id: &str) -> Option<&'a RankingRow> {
    rows.iter().find(|row| row.player_id == player_id)
}

/// Per-chart reference scores, loaded from the course data table.
/// Read-only calibration constants; never mutated by the crawler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartReference {
    pub average_score: f64,
    pub top_score: f64,
    pub theoretical_score: f64,
    pub optimized_p: f64,
}

impl ChartReference {
    /// Curve exponent clamped to the calculator's documented minimum.
    /// The clamp lives here, on the caller side; `compute_bpi` never clamps.
    pub fn pow_coef(&self) -> f64 {
        self.optimized_p.max(MIN_POW_COEF)
    }
}

/// One row of the weekly result report: ranking row joined with BPI.
/// Column set follows the result sheet (Rank, LR2ID, PlayerName, Score,
/// Score Rate (%), BPI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub rank: u32,
    pub lr2_id: String,
    pub player_name: String,
    pub score: String,
    pub score_rate_percent: Option<f64>,
    pub bpi: Option<f64>,
}

impl ReportRow {
    /// Join a ranking row with the course reference. `bpi` is `None` when
    /// the course has no reference entry or the score cell is unparseable.
    pub fn from_ranking(row: &RankingRow, reference: Option<&ChartReference>) -> Self {
        let bpi = match (row.ex_score(), reference) {
            (Some(ex_score), Some(reference)) => Some(course_bpi(reference, ex_score)),
            _ => None,
        };
        Self {
            rank: row.rank,
            lr2_id: row.player_id.clone(),
            player_name: row.player_name.clone(),
            score: row.score.clone(),
            score_rate_percent: row.score_rate(),
            bpi,
        }
    }
}
