//! Random password generation.
//!
//! Handles the generator panel (configurable classes and length) and the
//! add-credential dialog (fixed 16 characters from every class).

use std::ops::RangeInclusive;

use rand::Rng;
use secrecy::SecretString;
use thiserror::Error;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
/// Symbols the generator samples from. Wider than the set the strength
/// check recognizes.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Default length for both call sites.
pub const DEFAULT_LENGTH: usize = 16;

/// Lengths the generator panel accepts.
pub const LENGTH_RANGE: RangeInclusive<usize> = 8..=50;

/// Environment variable overriding the default generator length.
pub const LENGTH_ENV_VAR: &str = "VAULT_GENERATOR_LENGTH";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Please select at least one character type")]
    EmptyCharset,
    #[error("Password length {length} is outside {min}..={max}")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },
}

/// Generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl GeneratorOptions {
    /// Default options with the length taken from [`generator_length_from_env`].
    pub fn from_env() -> Self {
        Self {
            length: generator_length_from_env(),
            ..Self::default()
        }
    }

    /// The sampling alphabet: enabled classes concatenated in fixed order.
    pub fn charset(&self) -> String {
        [
            (self.include_uppercase, UPPERCASE),
            (self.include_lowercase, LOWERCASE),
            (self.include_numbers, NUMBERS),
            (self.include_symbols, SYMBOLS),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, chars)| *chars)
        .collect()
    }
}

/// Returns the default generator length.
///
/// Priority:
/// 1. Environment variable `VAULT_GENERATOR_LENGTH`, clamped to [`LENGTH_RANGE`]
/// 2. [`DEFAULT_LENGTH`]
///
/// A value that does not parse as an integer falls back to the default.
pub fn generator_length_from_env() -> usize {
    match std::env::var(LENGTH_ENV_VAR) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(length) => length.clamp(*LENGTH_RANGE.start(), *LENGTH_RANGE.end()),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Ignoring {}={:?}: {}, using {}",
                    LENGTH_ENV_VAR,
                    raw,
                    _e,
                    DEFAULT_LENGTH
                );
                DEFAULT_LENGTH
            }
        },
        Err(_) => DEFAULT_LENGTH,
    }
}

/// Generates a password from the given options using the thread RNG.
///
/// # Errors
///
/// Returns error if:
/// - every character class is disabled
/// - `options.length` is outside [`LENGTH_RANGE`]
pub fn generate_password(options: &GeneratorOptions) -> Result<SecretString, GeneratorError> {
    generate_with_rng(options, &mut rand::rng())
}

/// Generates a 16 character password from every character class.
pub fn generate_default() -> SecretString {
    let charset: Vec<char> = GeneratorOptions::default().charset().chars().collect();
    sample(&charset, DEFAULT_LENGTH, &mut rand::rng())
}

/// Same as [`generate_password`] with a caller-provided RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<SecretString, GeneratorError> {
    let charset: Vec<char> = options.charset().chars().collect();
    if charset.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::warn!("Password generation refused: no character class selected");
        return Err(GeneratorError::EmptyCharset);
    }

    if !LENGTH_RANGE.contains(&options.length) {
        return Err(GeneratorError::LengthOutOfRange {
            length: options.length,
            min: *LENGTH_RANGE.start(),
            max: *LENGTH_RANGE.end(),
        });
    }

    Ok(sample(&charset, options.length, rng))
}

/// Uniform sampling with replacement. `charset` must not be empty.
fn sample<R: Rng + ?Sized>(charset: &[char], length: usize, rng: &mut R) -> SecretString {
    let password: String = (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())])
        .collect();
    SecretString::new(password.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment run under #[serial]
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn remove_env(key: &str) {
        // SAFETY: tests touching the environment run under #[serial]
        unsafe {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.length, 16);
        assert_eq!(options.charset().chars().count(), 26 + 26 + 10 + 26);
    }

    #[test]
    fn test_charset_order() {
        let options = GeneratorOptions {
            include_uppercase: false,
            include_symbols: false,
            ..GeneratorOptions::default()
        };
        assert_eq!(options.charset(), format!("{}{}", LOWERCASE, NUMBERS));
    }

    #[test]
    fn test_empty_charset_refused() {
        let options = GeneratorOptions {
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
            ..GeneratorOptions::default()
        };
        let result = generate_password(&options);
        assert!(matches!(result, Err(GeneratorError::EmptyCharset)));
    }

    #[test]
    fn test_length_out_of_range() {
        for length in [0, 7, 51] {
            let options = GeneratorOptions {
                length,
                ..GeneratorOptions::default()
            };
            assert_eq!(
                generate_password(&options).err(),
                Some(GeneratorError::LengthOutOfRange {
                    length,
                    min: 8,
                    max: 50
                })
            );
        }
    }

    #[test]
    fn test_generated_length_matches_options() {
        for length in [8, 16, 33, 50] {
            let options = GeneratorOptions {
                length,
                ..GeneratorOptions::default()
            };
            let pwd = generate_password(&options).expect("generation should succeed");
            assert_eq!(pwd.expose_secret().chars().count(), length);
        }
    }

    #[test]
    fn test_generated_chars_come_from_enabled_classes() {
        let options = GeneratorOptions {
            length: 50,
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: true,
            include_symbols: false,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pwd = generate_with_rng(&options, &mut rng).expect("generation should succeed");
            assert!(pwd.expose_secret().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let options = GeneratorOptions::default();
        let a = generate_with_rng(&options, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_with_rng(&options, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_generate_default() {
        let charset = GeneratorOptions::default().charset();
        let pwd = generate_default();
        assert_eq!(pwd.expose_secret().chars().count(), 16);
        assert!(pwd.expose_secret().chars().all(|c| charset.contains(c)));
    }

    #[test]
    #[serial]
    fn test_length_from_env_default() {
        remove_env(LENGTH_ENV_VAR);
        assert_eq!(generator_length_from_env(), 16);
    }

    #[test]
    #[serial]
    fn test_length_from_env_override() {
        set_env(LENGTH_ENV_VAR, "24");
        assert_eq!(generator_length_from_env(), 24);
        assert_eq!(GeneratorOptions::from_env().length, 24);
        remove_env(LENGTH_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_length_from_env_clamped() {
        set_env(LENGTH_ENV_VAR, "4");
        assert_eq!(generator_length_from_env(), 8);
        set_env(LENGTH_ENV_VAR, "500");
        assert_eq!(generator_length_from_env(), 50);
        remove_env(LENGTH_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_length_from_env_invalid() {
        set_env(LENGTH_ENV_VAR, "sixteen");
        assert_eq!(generator_length_from_env(), 16);
        remove_env(LENGTH_ENV_VAR);
    }
}
