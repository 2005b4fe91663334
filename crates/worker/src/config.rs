use chrono_tz::Tz;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Local hour at which the nightly analysis fires (default: `17`).
    pub analysis_hour: u32,
    /// Local minute at which the nightly analysis fires (default: `0`).
    pub analysis_minute: u32,
    /// IANA timezone the schedule is expressed in (default: `Europe/Oslo`).
    pub schedule_tz: Tz,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default       |
    /// |-------------------|---------------|
    /// | `ANALYSIS_HOUR`   | `17`          |
    /// | `ANALYSIS_MINUTE` | `0`           |
    /// | `SCHEDULE_TZ`     | `Europe/Oslo` |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values; a worker with a wrong schedule is
    /// worse than one that refuses to start.
    pub fn from_env() -> Self {
        let analysis_hour: u32 = std::env::var("ANALYSIS_HOUR")
            .unwrap_or_else(|_| "17".into())
            .parse()
            .expect("ANALYSIS_HOUR must be a number");
        assert!(analysis_hour < 24, "ANALYSIS_HOUR must be 0-23");

        let analysis_minute: u32 = std::env::var("ANALYSIS_MINUTE")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("ANALYSIS_MINUTE must be a number");
        assert!(analysis_minute < 60, "ANALYSIS_MINUTE must be 0-59");

        let schedule_tz: Tz = std::env::var("SCHEDULE_TZ")
            .unwrap_or_else(|_| "Europe/Oslo".into())
            .parse()
            .expect("SCHEDULE_TZ must be a valid IANA timezone name");

        Self {
            analysis_hour,
            analysis_minute,
            schedule_tz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timezone_parses() {
        let tz: Tz = "Europe/Oslo".parse().expect("zone should parse");
        assert_eq!(tz, chrono_tz::Europe::Oslo);
    }

    #[test]
    fn bogus_timezone_fails_to_parse() {
        assert!("Europe/Atlantis".parse::<Tz>().is_err());
    }
}
