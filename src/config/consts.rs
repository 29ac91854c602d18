// src/config/consts.rs

// Local data
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SOURCES: &[&str] = &[
    "nicknames_wiki.csv",
    "nicknames_media.csv",
    "nicknames_reddit.csv",
];
pub const DEFAULT_MASTER_FILE: &str = "nicknames_master.csv";
pub const CONFIG_FILE: &str = "nickboard.toml";
pub const CONFIG_ENV: &str = "NICKBOARD_CONFIG";

// Logging
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";

// Sentiment bucketing (compound score)
pub const POSITIVE_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_THRESHOLD: f64 = -0.05;
pub const SCORE_MIN: f64 = -1.0;
pub const SCORE_MAX: f64 = 1.0;

// Dashboard
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_EXPORT_STEM: &str = "nicknames_filtered";
