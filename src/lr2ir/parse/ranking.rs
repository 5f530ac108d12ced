use scraper::{ElementRef, Html, Selector};

use crate::lr2ir::models::RankingRow;

/// Zero-based position of the ranking table among all tables on the page.
/// The LR2IR CGI renders no ids or classes, so the table can only be found
/// by position; layout drift means changing this one constant.
pub const RANKING_TABLE_INDEX: usize = 3;

/// Column positions within the ranking table, resolved from the header row
/// by header text (the CGI's column order has shifted between skins).
#[derive(Debug, Clone, Copy)]
struct Columns {
    rank: usize,
    player: usize,
    score: usize,
    pg: usize,
    gr: usize,
}

impl Columns {
    fn max_index(&self) -> usize {
        self.rank
            .max(self.player)
            .max(self.score)
            .max(self.pg)
            .max(self.gr)
    }
}

/// Parse a decoded LR2IR course ranking page into participant rows.
///
/// Rows without a `playerid=` link in the player cell, with an empty score
/// cell, or with an unparseable rank are dropped; a page whose table count
/// or header layout does not match expectations is an error, so callers can
/// tell a broken fetch apart from a course with zero participants.
pub fn parse_ranking_html(html: &str) -> eyre::Result<Vec<RankingRow>> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let tables: Vec<ElementRef<'_>> = document.select(&table_selector).collect();
    if tables.len() <= RANKING_TABLE_INDEX {
        return Err(eyre::eyre!(
            "unexpected page layout: found {} table(s), ranking table expected at index {}",
            tables.len(),
            RANKING_TABLE_INDEX
        ));
    }
    let table = tables[RANKING_TABLE_INDEX];

    let mut table_rows = table.select(&row_selector);
    let header = table_rows
        .next()
        .ok_or_else(|| eyre::eyre!("ranking table has no header row"))?;
    let columns = resolve_columns(&header, &cell_selector)?;

    let mut rows = Vec::new();
    for row in table_rows {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.len() <= columns.max_index() {
            continue;
        }

        let Some(player_id) = extract_player_id(&cells[columns.player], &link_selector) else {
            continue;
        };

        let score = collect_text(&cells[columns.score]).trim().to_string();
        if score.is_empty() {
            continue;
        }

        let Some(rank) = parse_counter(&collect_text(&cells[columns.rank])) else {
            continue;
        };

        let player_name = collect_text(&cells[columns.player]).trim().to_string();
        let pg = parse_counter(&collect_text(&cells[columns.pg])).unwrap_or(0);
        let gr = parse_counter(&collect_text(&cells[columns.gr])).unwrap_or(0);

        rows.push(RankingRow {
            rank,
            player_id,
            player_name,
            score,
            pg,
            gr,
        });
    }

    Ok(rows)
}

/// Extract the course's linked chart identifier (the `bmsid=` query
/// parameter of the first matching hyperlink on the page), used as the key
/// into the course reference table.
pub fn parse_course_bmsid(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a").unwrap();

    for link in document.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some((_, rest)) = href.split_once("bmsid=") else {
            continue;
        };
        let bmsid = match rest.split_once('&') {
            Some((bmsid, _)) => bmsid,
            None => rest,
        };
        if !bmsid.is_empty() {
            return Some(bmsid.to_string());
        }
    }
    None
}

fn resolve_columns(header: &ElementRef<'_>, cell_selector: &Selector) -> eyre::Result<Columns> {
    let mut rank = None;
    let mut player = None;
    let mut score = None;
    let mut pg = None;
    let mut gr = None;

    for (idx, cell) in header.select(cell_selector).enumerate() {
        match collect_text(&cell).trim() {
            "順位" => rank = rank.or(Some(idx)),
            "プレイヤー" => player = player.or(Some(idx)),
            "スコア" => score = score.or(Some(idx)),
            "PG" => pg = pg.or(Some(idx)),
            "GR" => gr = gr.or(Some(idx)),
            _ => {}
        }
    }

    match (rank, player, score, pg, gr) {
        (Some(rank), Some(player), Some(score), Some(pg), Some(gr)) => Ok(Columns {
            rank,
            player,
            score,
            pg,
            gr,
        }),
        _ => Err(eyre::eyre!(
            "ranking table header missing expected columns (順位/プレイヤー/スコア/PG/GR)"
        )),
    }
}

fn extract_player_id(cell: &ElementRef<'_>, link_selector: &Selector) -> Option<String> {
    for link in cell.select(link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some((_, rest)) = href.split_once("playerid=") else {
            continue;
        };
        let player_id = match rest.split_once('&') {
            Some((player_id, _)) => player_id,
            None => rest,
        };
        if !player_id.is_empty() {
            return Some(player_id.to_string());
        }
    }
    None
}

fn collect_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("")
}

fn parse_counter(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
