use std::path::Path;

use clap::Parser;
use eyre::WrapErr;

use nebukawa_bot::cli::{BpiCommand, Command, CrawlCommand, FetchCommand, RootArgs};
use nebukawa_bot::config::AppConfig;
use nebukawa_bot::course_data::CourseDataIndex;
use nebukawa_bot::http::Lr2Client;
use nebukawa_bot::lr2ir::bpi::{compute_bpi, MIN_POW_COEF};
use nebukawa_bot::lr2ir::models::{find_player, ReportRow};
use nebukawa_bot::lr2ir::parse::{parse_course_bmsid, parse_ranking_html};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;
    config.ensure_dirs().wrap_err("create data directories")?;

    let client = Lr2Client::new(&config).wrap_err("initialize http client")?;

    match args.command {
        Command::Fetch {
            command: FetchCommand::Ranking { course_id, out },
        } => {
            let rows = client
                .fetch_ranking(course_id)
                .await
                .wrap_err("fetch ranking")?;
            write_json(&out, &rows)?;
            println!("saved={} rows={}", out.display(), rows.len());
        }
        Command::Fetch {
            command: FetchCommand::Bmsid { course_id },
        } => {
            let bmsid = client
                .fetch_course_bmsid(course_id)
                .await
                .wrap_err("fetch course page")?;
            match bmsid {
                Some(bmsid) => println!("bmsid={bmsid}"),
                None => println!("bmsid=none"),
            }
        }
        Command::Crawl {
            command:
                CrawlCommand::Report {
                    course_id,
                    courses,
                    out,
                },
        } => {
            let index = CourseDataIndex::load_from_path(&courses).wrap_err("load course data")?;

            // One live fetch; the same page yields both the rows and the
            // bmsid link used to key the reference table.
            let html = client
                .fetch_ranking_page(course_id)
                .await
                .wrap_err("fetch ranking page")?;
            let rows = parse_ranking_html(&html).wrap_err("parse ranking page")?;

            let entry = parse_course_bmsid(&html)
                .and_then(|bmsid| index.by_bmsid(&bmsid))
                .or_else(|| index.by_course_id(course_id));
            if entry.is_none() {
                tracing::warn!("course {course_id} has no reference entry; report omits BPI");
            }
            let reference = entry.map(|entry| entry.reference);

            let report: Vec<ReportRow> = rows
                .iter()
                .map(|row| ReportRow::from_ranking(row, reference.as_ref()))
                .collect();
            write_json(&out, &report)?;
            println!("saved={} rows={}", out.display(), report.len());
        }
        Command::Crawl {
            command:
                CrawlCommand::Mypage {
                    course_id,
                    player_id,
                },
        } => {
            let rows = client
                .fetch_ranking(course_id)
                .await
                .wrap_err("fetch ranking")?;
            match find_player(&rows, &player_id) {
                Some(row) => println!(
                    "rank={}/{} score={} pg={} gr={}",
                    row.rank,
                    rows.len(),
                    row.score,
                    row.pg,
                    row.gr
                ),
                None => println!("no record for player {player_id} on course {course_id}"),
            }
        }
        Command::Bpi {
            command:
                BpiCommand::Compute {
                    score,
                    average,
                    top,
                    max,
                    pow_coef,
                },
        } => {
            let bpi = compute_bpi(score, average, top, max, pow_coef.max(MIN_POW_COEF));
            println!("bpi={bpi:.2}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> eyre::Result<()> {
    let parent = out
        .parent()
        .ok_or_else(|| eyre::eyre!("invalid --out path: {out:?}"))?;
    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent).wrap_err("create output directory")?;
    }
    let json = serde_json::to_string_pretty(value).wrap_err("serialize json")?;
    std::fs::write(out, json).wrap_err("write json")?;
    Ok(())
}
