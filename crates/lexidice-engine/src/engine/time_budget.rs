use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Length of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeBudget {
    /// 45 seconds.
    VeryShort,
    /// 90 seconds.
    Short,
    /// 180 seconds.
    #[default]
    Default,
    /// 300 seconds.
    Medium,
    /// 600 seconds.
    Long,
    /// Any number of seconds.
    Custom(u32),
    /// No time limit; only elapsed time is tracked.
    Infinite,
}

impl TimeBudget {
    const PRESETS: [(Self, &'static str); 6] = [
        (Self::VeryShort, "very-short"),
        (Self::Short, "short"),
        (Self::Default, "default"),
        (Self::Medium, "medium"),
        (Self::Long, "long"),
        (Self::Infinite, "infinite"),
    ];

    /// Total seconds, or `None` for [`TimeBudget::Infinite`].
    #[must_use]
    pub const fn seconds(self) -> Option<u32> {
        match self {
            Self::VeryShort => Some(45),
            Self::Short => Some(90),
            Self::Default => Some(180),
            Self::Medium => Some(300),
            Self::Long => Some(600),
            Self::Custom(seconds) => Some(seconds),
            Self::Infinite => None,
        }
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.seconds().is_some()
    }
}

impl fmt::Display for TimeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Custom(seconds) = self {
            return write!(f, "{seconds}s");
        }
        let name = Self::PRESETS
            .iter()
            .find(|(budget, _)| budget == self)
            .map_or("custom", |(_, name)| name);
        f.write_str(name)
    }
}

impl FromStr for TimeBudget {
    type Err = String;

    /// Accepts a preset name or a positive number of seconds (`"120"`, `"120s"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((budget, _)) = Self::PRESETS.iter().find(|(_, name)| *name == s) {
            return Ok(*budget);
        }
        let seconds = s
            .strip_suffix('s')
            .unwrap_or(s)
            .parse::<u32>()
            .map_err(|_| format!("invalid time budget {s:?}"))?;
        if seconds == 0 {
            return Err("time budget must be at least 1 second".to_owned());
        }
        Ok(Self::Custom(seconds))
    }
}

/// Elapsed and remaining time of a session, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    budget: TimeBudget,
    elapsed: u32,
    remaining: Option<u32>,
}

impl SessionClock {
    #[must_use]
    pub const fn new(budget: TimeBudget) -> Self {
        Self {
            budget,
            elapsed: 0,
            remaining: budget.seconds(),
        }
    }

    #[must_use]
    pub const fn budget(&self) -> TimeBudget {
        self.budget
    }

    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Seconds left, or `None` for an unbounded budget.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Advances one second. Remaining time never drops below zero.
    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(1);
        }
    }
}
