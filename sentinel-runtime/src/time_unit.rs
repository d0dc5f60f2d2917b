use std::time::Duration;

/// Time unit used when reading delays and rates from text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    /// Accepts the full lowercase names ("milliseconds", "seconds", ...).
    /// Shorthand such as "5s" goes through [`TimeUnit::parse_duration`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "milliseconds" => Ok(TimeUnit::Milliseconds),
            "seconds" => Ok(TimeUnit::Seconds),
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            _ => Err(format!("Invalid time unit: {}", s)),
        }
    }
}

impl TimeUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ms" => Some(TimeUnit::Milliseconds),
            "s" => Some(TimeUnit::Seconds),
            "m" => Some(TimeUnit::Minutes),
            "h" => Some(TimeUnit::Hours),
            _ => None,
        }
    }

    pub fn to_duration(&self, value: u64) -> Duration {
        match self {
            TimeUnit::Milliseconds => Duration::from_millis(value),
            TimeUnit::Seconds => Duration::from_secs(value),
            TimeUnit::Minutes => Duration::from_secs(value.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(value.saturating_mul(3_600)),
        }
    }

    /// Parse "500ms", "10s", "2m", "1h" or a bare integer of milliseconds.
    ///
    /// Suffixes are lowercase only and must follow the number without a space.
    pub fn parse_duration(s: &str) -> Option<Duration> {
        let s = s.trim();
        let split_pos = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        if split_pos == 0 {
            return None;
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str.parse::<u64>().ok()?;
        if unit_str.is_empty() {
            return Some(TimeUnit::Milliseconds.to_duration(value));
        }

        TimeUnit::from_suffix(unit_str).map(|unit| unit.to_duration(value))
    }
}
