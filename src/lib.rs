pub mod bank;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;
pub mod storage;
pub mod stores;

#[cfg(test)]
pub mod test_utils;
