use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nebukawa-bot")]
#[command(about = "LR2IR course ranking crawler and BPI calculator")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        default_value = "data",
        value_name = "DIR",
        help = "Directory for local runtime data (reports, debug HTML)"
    )]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Fetch LR2IR pages and output parsed JSON")]
    Fetch {
        #[command(subcommand)]
        command: FetchCommand,
    },
    #[command(about = "Crawl a course and produce joined results")]
    Crawl {
        #[command(subcommand)]
        command: CrawlCommand,
    },
    #[command(about = "Compute BPI values from explicit reference scores")]
    Bpi {
        #[command(subcommand)]
        command: BpiCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FetchCommand {
    #[command(about = "Fetch a course ranking page and write parsed rows as JSON")]
    Ranking {
        #[arg(long, value_name = "ID", help = "LR2IR courseid query value")]
        course_id: u32,

        #[arg(
            long,
            default_value = "data/out/ranking.json",
            value_name = "FILE",
            help = "Output JSON file path"
        )]
        out: PathBuf,
    },
    #[command(about = "Fetch a course ranking page and print the linked bmsid")]
    Bmsid {
        #[arg(long, value_name = "ID", help = "LR2IR courseid query value")]
        course_id: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum CrawlCommand {
    #[command(about = "Fetch a ranking, join course reference scores, write a BPI report")]
    Report {
        #[arg(long, value_name = "ID", help = "LR2IR courseid query value")]
        course_id: u32,

        #[arg(
            long,
            value_name = "FILE",
            help = "Course data JSON with per-chart reference scores"
        )]
        courses: PathBuf,

        #[arg(
            long,
            default_value = "data/out/report.json",
            value_name = "FILE",
            help = "Output JSON file path"
        )]
        out: PathBuf,
    },
    #[command(about = "Fetch a ranking and print one player's result")]
    Mypage {
        #[arg(long, value_name = "ID", help = "LR2IR courseid query value")]
        course_id: u32,

        #[arg(long, value_name = "LR2ID", help = "LR2IR playerid to look up")]
        player_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BpiCommand {
    #[command(about = "Compute one BPI value")]
    Compute {
        #[arg(long, value_name = "INT", help = "Achieved EX score")]
        score: f64,

        #[arg(long, value_name = "INT", help = "Chart average (kaiden average) score")]
        average: f64,

        #[arg(long, value_name = "INT", help = "Chart top (world record) score")]
        top: f64,

        #[arg(long, value_name = "INT", help = "Theoretical maximum score")]
        max: f64,

        #[arg(
            long,
            default_value_t = 1.175,
            value_name = "FLOAT",
            help = "Curve exponent; values below 0.8 are clamped up"
        )]
        pow_coef: f64,
    },
}
