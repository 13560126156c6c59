//! Length section - the two-stage length gate.

use super::{SectionResult, Weakness};

/// Absolute floor, shared with the master password minimum.
pub const MIN_LENGTH: usize = 8;

/// Minimum length for a password to count as strong.
pub const STRONG_MIN_LENGTH: usize = 12;

/// Password length in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane count twice.
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// Checks the password length against both gates.
///
/// Length is measured with [`password_length`].
///
/// # Returns
/// - `Some(Weakness::TooShort)` below [`MIN_LENGTH`]
/// - `Some(Weakness::BelowStrongLength)` between the two gates
/// - `None` at or above [`STRONG_MIN_LENGTH`]
pub fn length_section(password: &str) -> SectionResult {
    let len = password_length(password);
    if len < MIN_LENGTH {
        return Some(Weakness::TooShort { min: MIN_LENGTH });
    }
    if len < STRONG_MIN_LENGTH {
        return Some(Weakness::BelowStrongLength {
            min: STRONG_MIN_LENGTH,
        });
    }
    None
}
