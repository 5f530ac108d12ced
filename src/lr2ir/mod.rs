pub mod bpi;
pub mod models;
pub mod parse;
