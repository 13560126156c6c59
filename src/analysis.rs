//! Vault security analysis - strength classification and aggregate scoring.

use std::collections::HashMap;
use std::fmt;

use secrecy::ExposeSecret;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::record::CredentialRecord;
use crate::sections::{Weakness, character_variety_section, length_section};

/// Penalty applied per unit of reused ratio.
const REUSE_PENALTY: f64 = 30.0;

/// Qualitative band for a vault score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    Weak,
    Fair,
    Good,
    Strong,
    Excellent,
}

impl SecurityLevel {
    /// Maps a score to its band. Lower bounds are inclusive, checked top-down.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => SecurityLevel::Excellent,
            75.. => SecurityLevel::Strong,
            50.. => SecurityLevel::Good,
            25.. => SecurityLevel::Fair,
            _ => SecurityLevel::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Weak => "Weak",
            SecurityLevel::Fair => "Fair",
            SecurityLevel::Good => "Good",
            SecurityLevel::Strong => "Strong",
            SecurityLevel::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate security summary over a full set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityAssessment {
    /// 0 to 100.
    pub score: u8,
    pub level: SecurityLevel,
    pub weak_password_count: usize,
    pub strong_password_count: usize,
    /// Every occurrence of a repeated password, the first one included.
    pub reused_password_count: usize,
}

impl SecurityAssessment {
    /// Assessment of an empty vault.
    pub const EMPTY: SecurityAssessment = SecurityAssessment {
        score: 100,
        level: SecurityLevel::Excellent,
        weak_password_count: 0,
        strong_password_count: 0,
        reused_password_count: 0,
    };

    /// Number of records the assessment was computed from.
    pub fn total(&self) -> usize {
        self.weak_password_count + self.strong_password_count
    }
}

impl fmt::Display for SecurityAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/100 ({}): {} strong, {} weak, {} reused",
            self.score,
            self.level,
            self.strong_password_count,
            self.weak_password_count,
            self.reused_password_count
        )
    }
}

/// Returns what keeps `password` from being strong, in section order.
///
/// An empty result means the password is strong. The variety section only
/// runs once the absolute length floor is cleared.
pub fn weakness_reasons(password: &str) -> Vec<Weakness> {
    let mut reasons = Vec::new();

    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&str) -> Option<Weakness>); 2] = [
        ("length", length_section),
        ("variety", character_variety_section),
    ];

    for (_section_name, section_fn) in sections {
        if let Some(weakness) = section_fn(password) {
            #[cfg(feature = "tracing")]
            tracing::trace!("Section {} failed: {}", _section_name, weakness);
            reasons.push(weakness);
            if matches!(weakness, Weakness::TooShort { .. }) {
                break;
            }
        }
    }

    reasons
}

/// Classifies a single password as strong (`true`) or weak.
///
/// Strong means at least 12 UTF-16 code units and at least 3 of: ASCII uppercase,
/// ASCII lowercase, ASCII digit, a symbol from
/// [`STRENGTH_SYMBOLS`](crate::STRENGTH_SYMBOLS). Anything under 8 characters is
/// rejected without looking further, and 8 to 11 characters is weak no
/// matter the variety.
pub fn classify_strength(password: &str) -> bool {
    length_section(password).is_none() && character_variety_section(password).is_none()
}

/// Computes the security assessment for the complete current set of records.
///
/// Pure: record order does not matter and the input is never mutated.
///
/// # Example
///
/// ```rust
/// use vault_score::{analyze, CredentialRecord, SecurityLevel};
/// use secrecy::SecretString;
///
/// let records = vec![CredentialRecord::new(
///     "github.com",
///     "me@example.com",
///     SecretString::new("Aa1!Aa1!Aa1!".to_string().into()),
/// )];
/// let assessment = analyze(&records);
/// assert_eq!(assessment.score, 100);
/// assert_eq!(assessment.level, SecurityLevel::Excellent);
/// ```
pub fn analyze(records: &[CredentialRecord]) -> SecurityAssessment {
    analyze_passwords(records.iter().map(|r| r.password.expose_secret()))
}

/// Same as [`analyze`] over bare password strings.
pub fn analyze_passwords<'a, I>(passwords: I) -> SecurityAssessment
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0usize;
    let mut strong = 0usize;
    let mut weak = 0usize;
    let mut occurrences: HashMap<&'a str, usize> = HashMap::new();

    for password in passwords {
        total += 1;
        *occurrences.entry(password).or_insert(0) += 1;
        if classify_strength(password) {
            strong += 1;
        } else {
            weak += 1;
        }
    }

    if total == 0 {
        return SecurityAssessment::EMPTY;
    }

    let reused: usize = occurrences.values().filter(|&&count| count > 1).sum();

    let total_f = total as f64;
    let strong_ratio = strong as f64 / total_f;
    let reused_ratio = reused as f64 / total_f;

    // f64::round breaks ties away from zero; negative ties are clamped to 0 anyway.
    let raw = (strong_ratio * 100.0 - reused_ratio * REUSE_PENALTY).round();
    let score = raw.clamp(0.0, 100.0) as u8;

    let assessment = SecurityAssessment {
        score,
        level: SecurityLevel::from_score(score),
        weak_password_count: weak,
        strong_password_count: strong,
        reused_password_count: reused,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        total,
        strong,
        weak,
        reused,
        score,
        level = %assessment.level,
        "vault security analyzed"
    );

    assessment
}

/// Async version that sends the assessment via channel.
#[cfg(feature = "async")]
pub async fn analyze_tx(records: &[CredentialRecord], tx: mpsc::Sender<SecurityAssessment>) {
    let assessment = analyze(records);

    if let Err(_e) = tx.send(assessment).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send security assessment: {}", _e);
    }
}
