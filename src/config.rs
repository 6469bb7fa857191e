use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the theme data files.
    pub data_dir: PathBuf,
    /// Directory for persisted state (missed deck, last result).
    pub state_dir: PathBuf,
    pub session_size: usize,
    pub time_limit_secs: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("SIMULADO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            state_dir: env::var("SIMULADO_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".simulado")),
            session_size: env::var("SIMULADO_SESSION_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            time_limit_secs: env::var("SIMULADO_TIME_LIMIT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30 * 60),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: PathBuf::from("testdata"),
            state_dir: PathBuf::from(".simulado-test"),
            session_size: 30,
            time_limit_secs: 1800,
        }
    }
}
