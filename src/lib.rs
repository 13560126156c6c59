//! Vault security scoring library
//!
//! This library computes the security assessment of a password vault,
//! classifies individual passwords as strong or weak, generates random
//! passwords and keeps the in-memory vault state a password manager page
//! works with.
//!
//! # Features
//!
//! - `async` (default): Enables delivering assessments over a tokio channel
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `VAULT_GENERATOR_LENGTH`: Default generator length (default: `16`,
//!   clamped to `8..=50`)
//!
//! # Example
//!
//! ```rust
//! use vault_score::{classify_strength, generate_default, SecurityLevel, Vault};
//! use secrecy::SecretString;
//!
//! let master = SecretString::new("correct horse".to_string().into());
//! let mut vault = Vault::new();
//! vault.setup_master_password(&master, &master).expect("valid master password");
//!
//! vault.add_record("github.com", "me@example.com", generate_default()).unwrap();
//! vault
//!     .add_record("bank.example", "me", SecretString::new("hunter2".to_string().into()))
//!     .unwrap();
//!
//! assert!(!classify_strength("hunter2"));
//! let assessment = vault.security();
//! assert_eq!(assessment.weak_password_count + assessment.strong_password_count, 2);
//! assert!(assessment.level <= SecurityLevel::Excellent);
//! ```

// Internal modules
mod analysis;
mod generator;
mod record;
mod sections;
mod vault;

// Public API
pub use analysis::{
    SecurityAssessment, SecurityLevel, analyze, analyze_passwords, classify_strength,
    weakness_reasons,
};
pub use generator::{
    DEFAULT_LENGTH, GeneratorError, GeneratorOptions, LENGTH_ENV_VAR, LENGTH_RANGE,
    generate_default, generate_password, generate_with_rng, generator_length_from_env,
};
pub use record::CredentialRecord;
pub use sections::{
    CharacterClasses, MIN_LENGTH, REQUIRED_CLASSES, STRONG_MIN_LENGTH,
    SYMBOLS as STRENGTH_SYMBOLS, Weakness, password_length,
};
pub use vault::{PIN_LENGTH, Vault, VaultError};

#[cfg(feature = "async")]
pub use analysis::analyze_tx;
