//! Integral clock frequencies with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KHZ: u64 = 1_000;
const MHZ: u64 = 1_000_000;
const GHZ: u64 = 1_000_000_000;

/// A clock frequency stored as a whole number of Hertz.
///
/// Parses strings like `"10MHz"`, `"2.5GHz"`, `"32768Hz"` and bare integers
/// (interpreted as Hz). Fractional inputs are accepted only when they resolve
/// to a whole number of Hertz. Displays using the largest unit that keeps the
/// value readable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frequency(u64);

impl Frequency {
    /// Creates a frequency from a value in Hertz.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a value in megahertz.
    pub const fn from_mhz(mhz: u64) -> Self {
        Self(mhz * MHZ)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(self) -> u64 {
        self.0
    }

    /// Returns `true` for a 0 Hz frequency, which no clock source may carry.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the clock period in picoseconds, truncated.
    ///
    /// Returns `None` for a zero frequency.
    pub fn period_ps(self) -> Option<u64> {
        if self.0 == 0 {
            None
        } else {
            Some(1_000_000_000_000 / self.0)
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        let (unit, suffix) = if hz >= GHZ {
            (GHZ, "GHz")
        } else if hz >= MHZ {
            (MHZ, "MHz")
        } else if hz >= KHZ {
            (KHZ, "KHz")
        } else {
            return write!(f, "{hz}Hz");
        };
        let whole = hz / unit;
        let frac = hz % unit;
        if frac == 0 {
            return write!(f, "{whole}{suffix}");
        }
        let width = unit.ilog10() as usize;
        let digits = format!("{frac:0width$}");
        write!(f, "{whole}.{}{suffix}", digits.trim_end_matches('0'))
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (num, scale) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, GHZ)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, MHZ)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, KHZ)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1)
        } else {
            (lower.as_str(), 1)
        };

        scaled_integer(num.trim(), scale)
            .map(Frequency)
            .ok_or_else(err)
    }
}

/// Parses `"12"` or `"2.5"` and multiplies by `scale`, rejecting anything that
/// does not land on a whole number.
fn scaled_integer(num: &str, scale: u64) -> Option<u64> {
    let num = num.replace('_', "");
    let (int_part, frac_part) = match num.split_once('.') {
        Some((i, f)) => (i, f),
        None => (num.as_str(), ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let whole: u64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut total = whole.checked_mul(scale)?;

    let frac_digits = frac_part.trim_end_matches('0');
    if !frac_digits.is_empty() {
        let denom = 10u64.checked_pow(frac_digits.len() as u32)?;
        let numer: u64 = frac_digits.parse().ok()?;
        let scaled = numer.checked_mul(scale)?;
        if scaled % denom != 0 {
            return None;
        }
        total = total.checked_add(scaled / denom)?;
    }
    Some(total)
}
