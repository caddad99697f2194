// Verdict classification for urlscope
// Maps the service's risk score to a severity tier, label and explanation

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Benign,
    Low,
    Suspicious,
    High,
    Malicious,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Benign => "Benign",
            Tier::Low => "Low Risk",
            Tier::Suspicious => "Suspicious",
            Tier::High => "High Risk",
            Tier::Malicious => "Malicious",
        }
    }

    pub fn visual_class(&self) -> VisualClass {
        match self {
            Tier::Benign | Tier::Low => VisualClass::Safe,
            Tier::Suspicious => VisualClass::Warning,
            Tier::High => VisualClass::Danger,
            Tier::Malicious => VisualClass::Critical,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity marker attached to a rendered result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualClass {
    Safe,
    Warning,
    Danger,
    Critical,
    Error,
}

impl VisualClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualClass::Safe => "safe",
            VisualClass::Warning => "warning",
            VisualClass::Danger => "danger",
            VisualClass::Critical => "critical",
            VisualClass::Error => "error",
        }
    }
}

impl fmt::Display for VisualClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictPresentation {
    pub tier: Tier,
    pub label: String,
    pub explanation: String,
}

/// One decimal place with ties rounded up (87.25 -> "87.3"); `{:.1}` alone
/// would round ties to even.
fn one_decimal(x: f64) -> String {
    format!("{:.1}", (x * 10.0).round() / 10.0)
}

struct Bucket {
    matches: fn(f64) -> bool,
    tier: Tier,
    explain: fn(f64) -> String,
}

/// Evaluated top to bottom, first match wins. The last row catches
/// everything above 75 (and NaN).
const BUCKETS: &[Bucket] = &[
    Bucket {
        matches: |s| s == 0.0,
        tier: Tier::Benign,
        explain: |_| {
            "Prediction: Benign — Model confidence: 100%. No malicious indicators detected."
                .to_string()
        },
    },
    Bucket {
        matches: |s| s > 0.0 && s <= 25.0,
        tier: Tier::Low,
        explain: |s| {
            format!(
                "Prediction: Low Risk — Classified as likely safe with {}% confidence. Minor anomalies observed.",
                one_decimal(100.0 - s)
            )
        },
    },
    Bucket {
        matches: |s| s > 25.0 && s <= 50.0,
        tier: Tier::Suspicious,
        explain: |s| {
            format!(
                "Prediction: Suspicious — {}% confidence. Behavioral patterns partially match known malicious signatures. Further investigation recommended.",
                one_decimal(100.0 - s)
            )
        },
    },
    Bucket {
        matches: |s| s > 50.0 && s <= 75.0,
        tier: Tier::High,
        explain: |s| {
            format!(
                "Prediction: High Risk — Strong correlation with phishing or malicious activity detected ({}% risk). Proceed with caution.",
                s
            )
        },
    },
    Bucket {
        matches: |_| true,
        tier: Tier::Malicious,
        explain: |s| {
            format!(
                "Prediction: Malicious — Classified as a high-confidence threat ({}% risk). Immediate blocking or avoidance strongly advised.",
                s
            )
        },
    },
];

/// Score bounds the service is expected to respect
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Classify a risk score.
///
/// Scores outside [0, 100] are clamped to the nearest bound first, so a
/// negative score reads as Benign and anything above 100 as Malicious at
/// 100% risk.
pub fn classify(score: f64) -> VerdictPresentation {
    let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
    if clamped != score {
        tracing::warn!(risk_score = score, clamped, "risk score out of range");
    }

    let bucket = BUCKETS
        .iter()
        .find(|b| (b.matches)(clamped))
        .unwrap_or(&BUCKETS[BUCKETS.len() - 1]);

    VerdictPresentation {
        tier: bucket.tier,
        label: bucket.tier.label().to_string(),
        explanation: (bucket.explain)(clamped),
    }
}
