//! Parameter value formatting and parsing.
//!
//! [`Formatter::text`] returns the bare value ("-6.0", "440") and
//! [`Formatter::unit`] the unit ("dB", "Hz"); hosts and editors combine them.
//!
//! ```ignore
//! let db = Formatter::Decibel { precision: 1, min_db: -60.0 };
//! assert_eq!(db.text(-6.0), "-6.0");
//! assert_eq!(db.unit(), "dB");
//! ```

/// Parameter value formatter.
///
/// Converts plain parameter values to display strings and parses user input
/// back to plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Generic float with configurable precision (e.g., "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Decibel formatter where the plain value is already in dB.
    ///
    /// Format: "+12.0", "-6.0", "-inf" below `min_db`.
    Decibel {
        /// Number of decimal places.
        precision: usize,
        /// Minimum dB value (below this shows "-inf")
        min_db: f64,
    },

    /// Frequency formatter with automatic Hz/kHz scaling ("440", "1.50k").
    Frequency,

    /// Milliseconds formatter.
    Milliseconds {
        /// Number of decimal places.
        precision: usize,
    },

    /// Seconds formatter.
    Seconds {
        /// Number of decimal places.
        precision: usize,
    },

    /// Percentage formatter. Input is 0.0-1.0, display is 0-100.
    Percent {
        /// Number of decimal places.
        precision: usize,
    },

    /// Stereo position, -1.0 (left) to +1.0 (right). Display: "L50", "C", "R50".
    Pan,

    /// Boolean formatter. Display: "On", "Off".
    Boolean,
}

impl Formatter {
    /// Convert a plain value to a display string (without unit).
    pub fn text(&self, value: f64) -> String {
        match self {
            Formatter::Float { precision }
            | Formatter::Milliseconds { precision }
            | Formatter::Seconds { precision } => {
                format!("{:.prec$}", value, prec = *precision)
            }

            Formatter::Decibel { precision, min_db } => {
                // strict less-than so min_db itself is shown as a number
                if value < *min_db {
                    "-inf".to_string()
                } else if value >= 0.0 {
                    format!("+{:.prec$}", value, prec = *precision)
                } else {
                    format!("{:.prec$}", value, prec = *precision)
                }
            }

            Formatter::Frequency => {
                if value >= 1000.0 {
                    format!("{:.2}k", value / 1000.0)
                } else if value >= 100.0 {
                    format!("{:.0}", value)
                } else {
                    format!("{:.1}", value)
                }
            }

            Formatter::Percent { precision } => {
                format!("{:.prec$}", value * 100.0, prec = *precision)
            }

            Formatter::Pan => {
                if value.abs() < 0.005 {
                    "C".to_string()
                } else if value < 0.0 {
                    format!("L{:.0}", value.abs() * 100.0)
                } else {
                    format!("R{:.0}", value * 100.0)
                }
            }

            Formatter::Boolean => {
                if value > 0.5 {
                    "On".to_string()
                } else {
                    "Off".to_string()
                }
            }
        }
    }

    /// Parse a display string to a plain value.
    ///
    /// Accepts input with or without the unit suffix. Returns `None` if the
    /// string cannot be parsed.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let s = s.trim();

        match self {
            Formatter::Float { .. } => s.parse().ok(),

            Formatter::Decibel { min_db, .. } => {
                let trimmed = s.trim_end_matches("dB").trim();
                if trimmed.eq_ignore_ascii_case("-inf") || trimmed == "-∞" {
                    return Some(*min_db);
                }
                trimmed.parse().ok()
            }

            Formatter::Frequency => {
                let lower = s.to_ascii_lowercase();
                if let Some(khz) = lower
                    .strip_suffix("khz")
                    .or_else(|| lower.strip_suffix('k'))
                {
                    return khz.trim().parse::<f64>().ok().map(|v| v * 1000.0);
                }
                lower.trim_end_matches("hz").trim().parse().ok()
            }

            Formatter::Milliseconds { .. } => s.trim_end_matches("ms").trim().parse().ok(),

            Formatter::Seconds { .. } => s.trim_end_matches('s').trim().parse().ok(),

            Formatter::Percent { .. } => s
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .ok()
                .map(|v| v / 100.0),

            Formatter::Pan => {
                let upper = s.to_ascii_uppercase();
                if upper == "C" || upper == "CENTER" || upper == "0" {
                    return Some(0.0);
                }
                if let Some(left) = upper.strip_prefix('L') {
                    return left.trim().parse::<f64>().ok().map(|v| -v / 100.0);
                }
                if let Some(right) = upper.strip_prefix('R') {
                    return right.trim().parse::<f64>().ok().map(|v| v / 100.0);
                }
                let v = s.parse::<f64>().ok()?;
                // raw numbers outside -1..=1 are read as -100..=100
                if v.abs() > 1.0 {
                    Some(v / 100.0)
                } else {
                    Some(v)
                }
            }

            Formatter::Boolean => match s.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" | "1" | "enabled" => Some(1.0),
                "off" | "false" | "no" | "0" | "disabled" => Some(0.0),
                _ => None,
            },
        }
    }

    /// Decimal places, for variants that have them.
    pub fn precision(&self) -> Option<usize> {
        match self {
            Formatter::Float { precision }
            | Formatter::Decibel { precision, .. }
            | Formatter::Milliseconds { precision }
            | Formatter::Seconds { precision }
            | Formatter::Percent { precision } => Some(*precision),
            Formatter::Frequency | Formatter::Pan | Formatter::Boolean => None,
        }
    }

    /// Same formatter with different precision. Variants without precision
    /// are returned unchanged.
    pub fn with_precision(self, precision: usize) -> Self {
        match self {
            Formatter::Float { .. } => Formatter::Float { precision },
            Formatter::Decibel { min_db, .. } => Formatter::Decibel { precision, min_db },
            Formatter::Milliseconds { .. } => Formatter::Milliseconds { precision },
            Formatter::Seconds { .. } => Formatter::Seconds { precision },
            Formatter::Percent { .. } => Formatter::Percent { precision },
            other => other,
        }
    }

    /// Get the unit string for this formatter.
    pub fn unit(&self) -> &'static str {
        match self {
            Formatter::Float { .. } | Formatter::Pan | Formatter::Boolean => "",
            Formatter::Decibel { .. } => "dB",
            Formatter::Frequency => "Hz",
            Formatter::Milliseconds { .. } => "ms",
            Formatter::Seconds { .. } => "s",
            Formatter::Percent { .. } => "%",
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}
