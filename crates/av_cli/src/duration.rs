use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Duration flag value such as `30s`, `1m30s` or `500ms`. A bare number is
/// read as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total = Duration::ZERO;
        let mut rest = s;
        while !rest.is_empty() {
            let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 {
                return Err(format!("Invalid duration: {}", s));
            }
            let number: u64 = rest[..digits]
                .parse()
                .map_err(|_| format!("Invalid number in duration: {}", s))?;
            rest = &rest[digits..];

            let unit_len = rest.chars().take_while(|c| c.is_ascii_alphabetic()).count();
            let unit = &rest[..unit_len];
            rest = rest[unit_len..].trim_start();

            let seconds_per_unit = match unit {
                "ms" => None,
                "" | "s" => Some(1),
                "m" => Some(60),
                "h" => Some(3600),
                other => return Err(format!("Invalid duration unit: {}", other)),
            };
            let part = match seconds_per_unit {
                None => Some(Duration::from_millis(number)),
                Some(factor) => number.checked_mul(factor).map(Duration::from_secs),
            };
            total = part
                .and_then(|part| total.checked_add(part))
                .ok_or_else(|| "Duration too large".to_string())?;
        }

        if total.is_zero() {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(total))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
