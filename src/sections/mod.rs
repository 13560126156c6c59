//! Password strength sections
//!
//! Each section checks one aspect of the strong-password rule and reports
//! the [`Weakness`] it found, if any.

use std::fmt;

mod length;
mod variety;

pub use length::{MIN_LENGTH, STRONG_MIN_LENGTH, length_section, password_length};
pub use variety::{CharacterClasses, REQUIRED_CLASSES, SYMBOLS, character_variety_section};

/// Result type for section functions.
/// - `Some(weakness)` - Section failed
/// - `None` - Section passed
pub type SectionResult = Option<Weakness>;

/// Something that keeps a password from being classified as strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weakness {
    /// Shorter than the absolute floor. Variety is not evaluated.
    TooShort { min: usize },
    /// Past the floor but short of the strong-password length.
    BelowStrongLength { min: usize },
    /// Not enough of the four character classes.
    LowVariety { found: usize, required: usize },
}

impl fmt::Display for Weakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weakness::TooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
            Weakness::BelowStrongLength { min } => {
                write!(f, "Strong passwords need at least {} characters", min)
            }
            Weakness::LowVariety { found, required } => write!(
                f,
                "Uses {} of 4 character types (uppercase, lowercase, numbers, symbols), needs {}",
                found, required
            ),
        }
    }
}
