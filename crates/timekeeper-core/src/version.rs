use std::fmt;

use serde::Serialize;

/// Build identification, assembled once at startup.
///
/// `TIMEKEEPER_COMMIT` and `TIMEKEEPER_BUILD_TIME` are read from the build
/// environment when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub commit: String,
    pub build_time: String,
    pub platform: String,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("TIMEKEEPER_COMMIT").unwrap_or("unknown").to_string(),
            build_time: option_env!("TIMEKEEPER_BUILD_TIME")
                .unwrap_or("unknown")
                .to_string(),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    pub fn short_commit(&self) -> &str {
        match self.commit.char_indices().nth(8) {
            Some((idx, _)) => &self.commit[..idx],
            None => &self.commit,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) built on {} for {}",
            self.version,
            self.short_commit(),
            self.build_time,
            self.platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commit() {
        let mut info = BuildInfo::current();
        info.commit = "0123456789abcdef".to_string();
        assert_eq!(info.short_commit(), "01234567");
        info.commit = "abc".to_string();
        assert_eq!(info.short_commit(), "abc");
    }

    #[test]
    fn test_display() {
        let info = BuildInfo {
            version: "1.0.0".to_string(),
            commit: "deadbeefcafe".to_string(),
            build_time: "2024-01-01T00:00:00Z".to_string(),
            platform: "linux/x86_64".to_string(),
        };
        assert_eq!(
            info.to_string(),
            "1.0.0 (deadbeef) built on 2024-01-01T00:00:00Z for linux/x86_64"
        );
    }
}
