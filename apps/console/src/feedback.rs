//! # User Feedback
//!
//! Transient notifications a view shows after a command: toasts and the
//! confetti burst on rewards. Handlers attach them to their response; the
//! renderer decides how to show them.

use serde::Serialize;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

/// One piece of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Feedback {
    Toast { level: ToastLevel, message: String },
    /// Confetti; `intensity` scales with how big the moment is.
    Celebration { intensity: u32 },
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Feedback::Toast {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Feedback::Toast {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// Small burst for referral conversions.
    pub fn small_celebration() -> Self {
        Feedback::Celebration { intensity: 80 }
    }

    /// QR scan burst.
    pub fn celebration() -> Self {
        Feedback::Celebration { intensity: 100 }
    }

    /// Big burst for redemptions.
    pub fn big_celebration() -> Self {
        Feedback::Celebration { intensity: 150 }
    }
}

/// Formats a count with thousands separators: `10000` → `"10,000"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(10000), "10,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_feedback_serialization() {
        let json = serde_json::to_value(Feedback::success("Invitation sent!")).unwrap();
        assert_eq!(json["type"], "toast");
        assert_eq!(json["level"], "success");

        let json = serde_json::to_value(Feedback::big_celebration()).unwrap();
        assert_eq!(json["type"], "celebration");
        assert_eq!(json["intensity"], 150);
    }
}
