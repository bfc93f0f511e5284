use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Attempt budget and fixed interval for the `wait_until*` helpers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOptions {
    /// Maximum number of predicate evaluations.
    pub max_attempts: u32,
    /// Delay between two evaluations.
    #[serde(rename = "interval_ms", with = "millis")]
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(2),
        }
    }
}

impl PollOptions {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Worst-case time spent sleeping when every attempt fails.
    pub fn max_wait(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }

    /// Reads poll settings from the environment.
    ///
    /// Reads:
    /// - `ONE_TEST_POLL_ATTEMPTS`: attempt budget
    /// - `ONE_TEST_POLL_INTERVAL_MS`: interval in milliseconds
    ///
    /// Unset variables keep their default. A variable that is set but empty,
    /// or not a non-negative integer, is an error.
    pub fn from_env() -> std::result::Result<Self, String> {
        let mut opts = Self::default();
        if let Some(attempts) = read_env_u64("ONE_TEST_POLL_ATTEMPTS")? {
            opts.max_attempts = u32::try_from(attempts)
                .map_err(|_| format!("ONE_TEST_POLL_ATTEMPTS is out of range: {attempts}"))?;
        }
        if let Some(interval_ms) = read_env_u64("ONE_TEST_POLL_INTERVAL_MS")? {
            opts.interval = Duration::from_millis(interval_ms);
        }
        Ok(opts)
    }

    /// Parses poll settings from a JSON fixture such as
    /// `{"max_attempts": 5, "interval_ms": 100}`. Missing fields keep defaults.
    pub fn from_json(text: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(text).map_err(|err| format!("invalid poll options JSON: {err}"))
    }
}

fn read_env_u64(name: &str) -> std::result::Result<Option<u64>, String> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Err(format!("{name} is set but empty")),
        Ok(raw) => parse_u64(name, &raw).map(Some),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(format!("{name} is not valid unicode")),
    }
}

fn parse_u64(name: &str, raw: &str) -> std::result::Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| format!("{name} must be a non-negative integer, got '{raw}': {err}"))
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
