pub mod app_state;
pub mod config;
pub mod data;
pub mod logging;
pub mod presenter;
pub mod storage;
pub mod utils;
