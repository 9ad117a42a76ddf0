//! Session configuration

use std::env;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::codec::parse_start_offset;
use crate::history::DEFAULT_UNDO_DEPTH;

/// Environment variable naming the log file
pub const ENV_LOG_PATH: &str = "EVENT_LOG_PATH";
/// Environment variable bounding the undo history
pub const ENV_UNDO_DEPTH: &str = "EVENT_LOG_UNDO_DEPTH";
/// Environment variable holding the video start time (`HH:MM:SS`)
pub const ENV_START: &str = "EVENT_LOG_START";

/// Configuration for a logging session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Path to the log file
    pub log_path: PathBuf,
    /// Video being annotated, if known
    pub video_path: Option<PathBuf>,
    /// Maximum number of undo records
    pub undo_depth: usize,
    /// Added to every playback position when recording
    pub start_offset: TimeDelta,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("events.csv"),
            video_path: None,
            undo_depth: DEFAULT_UNDO_DEPTH,
            start_offset: TimeDelta::zero(),
        }
    }
}

impl SessionConfig {
    /// Create config with a custom log path
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Log next to the video: `clip.mp4` logs to `clip.csv`
    pub fn for_video<P: AsRef<Path>>(video_path: P) -> Self {
        let video_path = video_path.as_ref();
        Self {
            log_path: video_path.with_extension("csv"),
            video_path: Some(video_path.to_path_buf()),
            ..Default::default()
        }
    }

    pub fn with_undo_depth(mut self, undo_depth: usize) -> Self {
        self.undo_depth = undo_depth;
        self
    }

    /// Set the start offset from `HH:MM:SS`, `MM:SS` or `SS`
    pub fn with_start(mut self, start: &str) -> Self {
        self.start_offset = parse_start_offset(start);
        self
    }

    /// Build from `EVENT_LOG_PATH`, `EVENT_LOG_UNDO_DEPTH` and `EVENT_LOG_START`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset or invalid values keep defaults.
    ///
    /// Relative log paths are resolved against the current directory.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LOG_PATH).filter(|p| !p.trim().is_empty()) {
            let path = PathBuf::from(path);
            config.log_path = if path.is_absolute() {
                path
            } else {
                env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(path)
            };
        }

        if let Some(depth) = lookup(ENV_UNDO_DEPTH) {
            match depth.trim().parse::<usize>() {
                Ok(depth) => config.undo_depth = depth,
                Err(_) => tracing::warn!(value = %depth, "Ignoring invalid {}", ENV_UNDO_DEPTH),
            }
        }

        if let Some(start) = lookup(ENV_START) {
            config.start_offset = parse_start_offset(&start);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_for_video() {
        let config = SessionConfig::for_video("/videos/junction.mp4");
        assert_eq!(config.log_path, PathBuf::from("/videos/junction.csv"));
        assert_eq!(config.video_path, Some(PathBuf::from("/videos/junction.mp4")));
    }

    #[test]
    fn test_from_lookup() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (ENV_LOG_PATH, "/tmp/day1.csv"),
            (ENV_UNDO_DEPTH, "5"),
            (ENV_START, "00:10:00"),
        ]));

        assert_eq!(config.log_path, PathBuf::from("/tmp/day1.csv"));
        assert_eq!(config.undo_depth, 5);
        assert_eq!(config.start_offset.num_seconds(), 600);
    }

    #[test]
    fn test_from_lookup_relative_and_invalid() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (ENV_LOG_PATH, "logs/day2.csv"),
            (ENV_UNDO_DEPTH, "lots"),
        ]));

        assert!(config.log_path.is_absolute());
        assert!(config.log_path.ends_with("logs/day2.csv"));
        assert_eq!(config.undo_depth, DEFAULT_UNDO_DEPTH);
        assert_eq!(config.start_offset, TimeDelta::zero());
    }
}
