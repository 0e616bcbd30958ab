//! Password generation for Passgen
//!
//! Character classes with fixed alphabets and the constrained-random
//! generator built on them.

pub mod charset;
pub mod password;

pub use charset::{CharacterClass, ClassCounts, PasswordOptions};
pub use password::{
    generate_password, generate_password_with_rng, generate_passwords,
    generate_passwords_with_rng, GenerationRequest,
};

#[cfg(test)]
mod tests;
