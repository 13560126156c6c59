//! Character variety section - uppercase, lowercase, digits, symbols.

use super::{SectionResult, Weakness};

/// Symbols that count toward the symbol class.
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// How many of the four classes a strong password needs.
pub const REQUIRED_CLASSES: usize = 3;

/// Which of the four character classes a password contains.
///
/// Only ASCII letters and digits count; anything outside [`SYMBOLS`] does
/// not count as a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharacterClasses {
    pub fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut acc, c| {
            acc.uppercase |= c.is_ascii_uppercase();
            acc.lowercase |= c.is_ascii_lowercase();
            acc.digit |= c.is_ascii_digit();
            acc.symbol |= SYMBOLS.contains(c);
            acc
        })
    }

    /// Number of classes present, 0 to 4.
    pub fn count(&self) -> usize {
        [self.uppercase, self.lowercase, self.digit, self.symbol]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Checks that at least [`REQUIRED_CLASSES`] character classes are present.
///
/// # Returns
/// - `Some(Weakness::LowVariety)` if too few classes are present
/// - `None` otherwise
pub fn character_variety_section(password: &str) -> SectionResult {
    let found = CharacterClasses::of(password).count();
    if found < REQUIRED_CLASSES {
        return Some(Weakness::LowVariety {
            found,
            required: REQUIRED_CLASSES,
        });
    }
    None
}
