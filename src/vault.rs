//! In-memory vault state.
//!
//! Holds everything the password manager page keeps between events: the
//! master password gate, the optional PIN, stored records and which of them
//! are currently revealed. Nothing is persisted or hashed.

use std::collections::HashSet;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::analysis::{SecurityAssessment, analyze};
use crate::record::CredentialRecord;
use crate::sections::{MIN_LENGTH, password_length};

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Master password is already set")]
    AlreadyInitialized,
    #[error("Master password has not been set")]
    NotInitialized,
    #[error("Master password must be at least {min} characters long")]
    MasterPasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid master password")]
    InvalidMasterPassword,
    #[error("Vault is locked")]
    Locked,
    #[error("PIN must be exactly {} digits", PIN_LENGTH)]
    InvalidPin,
    #[error("PINs do not match")]
    PinMismatch,
    #[error("No PIN is configured")]
    NoPinConfigured,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

/// Vault state.
#[derive(Debug, Default)]
pub struct Vault {
    master_password: Option<SecretString>,
    unlocked: bool,
    pin: Option<SecretString>,
    records: Vec<CredentialRecord>,
    visible: HashSet<String>,
}

impl Vault {
    /// An empty vault with no master password.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.master_password.is_some()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Sets the master password for the first time and unlocks the vault.
    ///
    /// Length is measured in UTF-16 code units, like the strength check.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - a master password is already set
    /// - `password` is shorter than 8 characters
    /// - `password` and `confirm` differ
    pub fn setup_master_password(
        &mut self,
        password: &SecretString,
        confirm: &SecretString,
    ) -> Result<(), VaultError> {
        if self.is_initialized() {
            return Err(VaultError::AlreadyInitialized);
        }

        let pwd = password.expose_secret();
        if password_length(pwd) < MIN_LENGTH {
            return Err(VaultError::MasterPasswordTooShort { min: MIN_LENGTH });
        }
        if pwd != confirm.expose_secret() {
            return Err(VaultError::PasswordMismatch);
        }

        self.master_password = Some(password.clone());
        self.unlocked = true;

        #[cfg(feature = "tracing")]
        tracing::info!("Master password set, vault unlocked");

        Ok(())
    }

    /// Plain comparison against the stored master password.
    pub fn verify_master_password(&self, password: &SecretString) -> bool {
        self.master_password
            .as_ref()
            .map(|stored| stored.expose_secret() == password.expose_secret())
            .unwrap_or(false)
    }

    pub fn unlock(&mut self, password: &SecretString) -> Result<(), VaultError> {
        if !self.is_initialized() {
            return Err(VaultError::NotInitialized);
        }
        if !self.verify_master_password(password) {
            #[cfg(feature = "tracing")]
            tracing::warn!("Vault unlock FAILED: invalid master password");
            return Err(VaultError::InvalidMasterPassword);
        }

        self.unlocked = true;

        #[cfg(feature = "tracing")]
        tracing::info!("Vault unlocked");

        Ok(())
    }

    /// Locks the vault and hides every revealed password.
    pub fn lock(&mut self) {
        self.unlocked = false;
        self.visible.clear();

        #[cfg(feature = "tracing")]
        tracing::info!("Vault locked");
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Sets up a PIN, replacing any existing one.
    pub fn set_pin(
        &mut self,
        master: &SecretString,
        pin: &SecretString,
        confirm: &SecretString,
    ) -> Result<(), VaultError> {
        self.require_master(master)?;
        validate_pin(pin, confirm)?;
        self.pin = Some(pin.clone());

        #[cfg(feature = "tracing")]
        tracing::info!("PIN set up");

        Ok(())
    }

    /// Replaces an existing PIN.
    pub fn change_pin(
        &mut self,
        master: &SecretString,
        pin: &SecretString,
        confirm: &SecretString,
    ) -> Result<(), VaultError> {
        self.require_master(master)?;
        if !self.has_pin() {
            return Err(VaultError::NoPinConfigured);
        }
        validate_pin(pin, confirm)?;
        self.pin = Some(pin.clone());

        #[cfg(feature = "tracing")]
        tracing::info!("PIN changed");

        Ok(())
    }

    pub fn remove_pin(&mut self, master: &SecretString) -> Result<(), VaultError> {
        self.require_master(master)?;
        self.pin = None;

        #[cfg(feature = "tracing")]
        tracing::info!("PIN removed");

        Ok(())
    }

    /// Stores a new record. All three fields must be non-empty.
    pub fn add_record(
        &mut self,
        website: &str,
        username: &str,
        password: SecretString,
    ) -> Result<&CredentialRecord, VaultError> {
        self.require_unlocked()?;
        if website.is_empty() {
            return Err(VaultError::MissingField("website"));
        }
        if username.is_empty() {
            return Err(VaultError::MissingField("username"));
        }
        if password.expose_secret().is_empty() {
            return Err(VaultError::MissingField("password"));
        }

        let record = CredentialRecord::new(website, username, password);
        let id = record.id.clone();

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %record.id, website = %record.website, "record added");

        self.records.push(record);
        self.records.last().ok_or(VaultError::RecordNotFound(id))
    }

    pub fn delete_record(&mut self, id: &str) -> Result<CredentialRecord, VaultError> {
        self.require_unlocked()?;
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?;
        self.visible.remove(id);

        #[cfg(feature = "tracing")]
        tracing::debug!(id, "record deleted");

        Ok(self.records.remove(index))
    }

    /// Records whose website or username contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&CredentialRecord> {
        self.records.iter().filter(|r| r.matches(query)).collect()
    }

    /// Flips whether a record's password is revealed. Returns the new state.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, VaultError> {
        self.require_unlocked()?;
        if !self.records.iter().any(|r| r.id == id) {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }
        if self.visible.remove(id) {
            Ok(false)
        } else {
            self.visible.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Security assessment of every stored record.
    pub fn security(&self) -> SecurityAssessment {
        analyze(&self.records)
    }

    fn require_unlocked(&self) -> Result<(), VaultError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(VaultError::Locked)
        }
    }

    fn require_master(&self, master: &SecretString) -> Result<(), VaultError> {
        if !self.is_initialized() {
            return Err(VaultError::NotInitialized);
        }
        if !self.verify_master_password(master) {
            return Err(VaultError::InvalidMasterPassword);
        }
        Ok(())
    }
}

fn validate_pin(pin: &SecretString, confirm: &SecretString) -> Result<(), VaultError> {
    let pin = pin.expose_secret();
    if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VaultError::InvalidPin);
    }
    if pin != confirm.expose_secret() {
        return Err(VaultError::PinMismatch);
    }
    Ok(())
}
