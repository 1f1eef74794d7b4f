pub mod batch;
pub mod config;
pub mod morph;
pub mod output;
pub mod parser;
pub mod sentence;
