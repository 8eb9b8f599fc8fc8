pub mod api;
pub mod config;
pub mod intake;
pub mod output;
pub mod quiz;
pub mod scoring;
pub mod storage;
pub mod sync;
pub mod take;
