pub mod ranking;

pub use ranking::{parse_course_bmsid, parse_ranking_html};
