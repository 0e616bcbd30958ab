//! Password generation
//!
//! One character is drawn from every enabled class, the rest of the length is
//! filled uniformly from the combined alphabet, and the result is shuffled.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::charset::{CharacterClass, PasswordOptions};
use crate::error::{PassgenError, Result};
use crate::{BATCH_MAX, BATCH_MIN, PASSWORD_MIN_LENGTH};

/// A validated-on-demand generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Password length
    pub length: usize,
    /// Enabled character classes
    #[serde(flatten)]
    pub options: PasswordOptions,
}

impl GenerationRequest {
    pub fn new(length: usize, options: PasswordOptions) -> Self {
        Self { length, options }
    }

    /// Check the preconditions and return the enabled classes in draw order.
    ///
    /// Length is checked before class selection.
    pub fn validate(&self) -> Result<Vec<CharacterClass>> {
        if self.length < PASSWORD_MIN_LENGTH {
            return Err(PassgenError::InvalidLength(self.length));
        }

        let classes = self.options.enabled_classes();
        if classes.is_empty() {
            return Err(PassgenError::NoCharacterClassSelected);
        }

        if self.length < classes.len() {
            return Err(PassgenError::LengthTooShortForClasses {
                length: self.length,
                classes: classes.len(),
            });
        }

        Ok(classes)
    }

    /// Generate one password with the thread-local RNG
    pub fn generate(&self) -> Result<String> {
        self.generate_with_rng(&mut rand::rng())
    }

    /// Generate one password with the given RNG
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        let classes = self.validate()?;
        assemble(rng, self.length, &classes)
    }
}

/// Generate a random password.
///
/// # Arguments
/// * `length` - Password length, at least 4
/// * `options` - Enabled character classes, at least one
///
/// # Example
/// ```
/// use passgen::{generate_password, PasswordOptions};
///
/// let options = PasswordOptions {
///     include_lowercase: true,
///     include_uppercase: true,
///     include_numbers: true,
///     include_symbols: false,
/// };
/// let password = generate_password(12, &options).unwrap();
/// assert_eq!(password.len(), 12);
/// assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_password(length: usize, options: &PasswordOptions) -> Result<String> {
    generate_password_with_rng(&mut rand::rng(), length, options)
}

/// Generate a random password drawing from `rng`
pub fn generate_password_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    options: &PasswordOptions,
) -> Result<String> {
    GenerationRequest::new(length, *options).generate_with_rng(rng)
}

/// Generate `count` independent passwords with the same settings.
///
/// `count` must be within `BATCH_MIN..=BATCH_MAX`. Nothing is drawn unless
/// every precondition holds.
pub fn generate_passwords(
    length: usize,
    count: usize,
    options: &PasswordOptions,
) -> Result<Vec<String>> {
    generate_passwords_with_rng(&mut rand::rng(), length, count, options)
}

/// Batch generation drawing from `rng`
pub fn generate_passwords_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    count: usize,
    options: &PasswordOptions,
) -> Result<Vec<String>> {
    if !(BATCH_MIN..=BATCH_MAX).contains(&count) {
        return Err(PassgenError::InvalidCount(count));
    }

    let classes = GenerationRequest::new(length, *options).validate()?;
    let passwords = (0..count)
        .map(|_| assemble(rng, length, &classes))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Generated {} passwords of length {} from {} classes",
        passwords.len(),
        length,
        classes.len()
    );
    Ok(passwords)
}

/// Draw the required characters, fill the remaining length and shuffle.
fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    classes: &[CharacterClass],
) -> Result<String> {
    if classes.is_empty() {
        return Err(PassgenError::NoCharacterClassSelected);
    }
    if length < classes.len() {
        return Err(PassgenError::LengthTooShortForClasses {
            length,
            classes: classes.len(),
        });
    }

    let mut password: Vec<u8> = Vec::with_capacity(length);
    let mut available: Vec<u8> = Vec::new();

    for class in classes {
        let alphabet = class.alphabet().as_bytes();
        password.push(pick(rng, alphabet));
        available.extend_from_slice(alphabet);
    }

    for _ in classes.len()..length {
        password.push(pick(rng, &available));
    }

    password.shuffle(rng);

    // Alphabets are ASCII
    Ok(password.into_iter().map(char::from).collect())
}

fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8]) -> u8 {
    alphabet[rng.random_range(0..alphabet.len())]
}
