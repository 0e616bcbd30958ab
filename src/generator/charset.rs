//! Character classes and their alphabets

use serde::{Deserialize, Serialize};

/// Lowercase letters
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase letters
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Decimal digits
pub const DIGITS: &str = "0123456789";
/// Punctuation symbols
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A category of characters with a fixed alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// All classes, in draw order
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    /// The alphabet of this class
    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    /// Check if a character belongs to this class
    pub fn contains(self, c: char) -> bool {
        self.alphabet().contains(c)
    }

    /// Find the class a character belongs to, if any
    pub fn of(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.contains(c))
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Digit => "numbers",
            CharacterClass::Symbol => "symbols",
        }
    }
}

/// Which character classes a password may contain.
///
/// Serializes with the camelCase field names used by existing callers
/// (`includeLowercase`, `includeUppercase`, `includeNumbers`, `includeSymbols`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordOptions {
    /// Include lowercase letters (a-z)
    pub include_lowercase: bool,
    /// Include uppercase letters (A-Z)
    pub include_uppercase: bool,
    /// Include digits (0-9)
    pub include_numbers: bool,
    /// Include punctuation symbols
    pub include_symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            include_lowercase: true,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl PasswordOptions {
    /// Options with every class disabled
    pub fn none() -> Self {
        Self {
            include_lowercase: false,
            include_uppercase: false,
            include_numbers: false,
            include_symbols: false,
        }
    }

    /// Build options enabling exactly the given classes
    pub fn from_classes<I: IntoIterator<Item = CharacterClass>>(classes: I) -> Self {
        classes.into_iter().fold(Self::none(), |mut options, class| {
            options.set(class, true);
            options
        })
    }

    /// Check if a class is enabled
    pub fn includes(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Digit => self.include_numbers,
            CharacterClass::Symbol => self.include_symbols,
        }
    }

    /// Enable or disable a class
    pub fn set(&mut self, class: CharacterClass, enabled: bool) {
        match class {
            CharacterClass::Lowercase => self.include_lowercase = enabled,
            CharacterClass::Uppercase => self.include_uppercase = enabled,
            CharacterClass::Digit => self.include_numbers = enabled,
            CharacterClass::Symbol => self.include_symbols = enabled,
        }
    }

    /// Enabled classes in draw order
    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.includes(*class))
            .collect()
    }

    /// Concatenated alphabets of the enabled classes
    pub fn available_alphabet(&self) -> String {
        self.enabled_classes()
            .into_iter()
            .map(CharacterClass::alphabet)
            .collect()
    }
}

/// Per-class character counts of a password
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub symbols: usize,
    /// Characters outside every class
    pub other: usize,
}

impl ClassCounts {
    /// Count the characters of `password` per class
    pub fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut counts, c| {
            match CharacterClass::of(c) {
                Some(CharacterClass::Lowercase) => counts.lowercase += 1,
                Some(CharacterClass::Uppercase) => counts.uppercase += 1,
                Some(CharacterClass::Digit) => counts.digits += 1,
                Some(CharacterClass::Symbol) => counts.symbols += 1,
                None => counts.other += 1,
            }
            counts
        })
    }

    /// Count for one class
    pub fn get(&self, class: CharacterClass) -> usize {
        match class {
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Digit => self.digits,
            CharacterClass::Symbol => self.symbols,
        }
    }

    /// Classes with at least one character
    pub fn present_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.get(*class) > 0)
            .collect()
    }

    /// True if the password holds every enabled class and nothing else
    pub fn matches(&self, options: &PasswordOptions) -> bool {
        self.other == 0
            && CharacterClass::ALL
                .into_iter()
                .all(|class| options.includes(class) == (self.get(class) > 0))
    }

    /// Total characters counted
    pub fn total(&self) -> usize {
        self.lowercase + self.uppercase + self.digits + self.symbols + self.other
    }
}
