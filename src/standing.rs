use std::fmt;

use serde::Serialize;

/// Qualitative band for a grade-point average on the 0–5 scale.
///
/// | Range   | Standing     |
/// |---------|--------------|
/// | >= 4.5  | Excellent    |
/// | >= 4.0  | Good         |
/// | >= 3.5  | Regular      |
/// | >= 3.0  | Low          |
/// | < 3.0   | Insufficient |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Excellent,
    Good,
    Regular,
    Low,
    Insufficient,
}

impl Standing {
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a >= 4.5 => Standing::Excellent,
            a if a >= 4.0 => Standing::Good,
            a if a >= 3.5 => Standing::Regular,
            a if a >= 3.0 => Standing::Low,
            _ => Standing::Insufficient,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::Excellent => "Excellent",
            Standing::Good => "Good",
            Standing::Regular => "Regular",
            Standing::Low => "Low",
            Standing::Insufficient => "Insufficient",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_boundaries() {
        assert_eq!(Standing::from_average(5.00), Standing::Excellent);
        assert_eq!(Standing::from_average(4.50), Standing::Excellent);
        assert_eq!(Standing::from_average(4.49), Standing::Good);
        assert_eq!(Standing::from_average(4.00), Standing::Good);
        assert_eq!(Standing::from_average(3.99), Standing::Regular);
        assert_eq!(Standing::from_average(3.50), Standing::Regular);
        assert_eq!(Standing::from_average(3.49), Standing::Low);
        assert_eq!(Standing::from_average(3.00), Standing::Low);
        assert_eq!(Standing::from_average(2.99), Standing::Insufficient);
        assert_eq!(Standing::from_average(0.00), Standing::Insufficient);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Standing::Regular.to_string(), "Regular");
    }
}
