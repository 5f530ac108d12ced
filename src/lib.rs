pub mod cli;
pub mod config;
pub mod course_data;
pub mod http;
pub mod lr2ir;
