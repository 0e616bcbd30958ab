//! Statistical tests for password generation

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::charset::{CharacterClass, ClassCounts, PasswordOptions};
use super::password::generate_password_with_rng;

/// Pearson chi-square statistic of `observed` against `expected(c)` over `alphabet`
fn chi_square(
    observed: &HashMap<char, usize>,
    alphabet: &str,
    expected: impl Fn(char) -> f64,
) -> f64 {
    alphabet
        .chars()
        .map(|c| {
            let e = expected(c);
            let o = observed.get(&c).copied().unwrap_or(0) as f64;
            (o - e).powi(2) / e
        })
        .sum()
}

fn tally(passwords: &[String]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for password in passwords {
        for c in password.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
    }
    counts
}

/// 10,000 passwords of length 12 with every class enabled: each output holds
/// all four classes and the per-character frequencies fit the model
/// "one forced draw per class + uniform filler over the 88-char alphabet".
#[test]
fn test_full_alphabet_frequency_fit() {
    const RUNS: usize = 10_000;
    const LENGTH: usize = 12;

    let options = PasswordOptions::default();
    let alphabet = options.available_alphabet();
    let classes = options.enabled_classes().len();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let passwords: Vec<String> = (0..RUNS)
        .map(|_| generate_password_with_rng(&mut rng, LENGTH, &options).unwrap())
        .collect();

    for password in &passwords {
        assert_eq!(password.len(), LENGTH);
        let counts = ClassCounts::of(password);
        assert!(counts.matches(&options), "{password} misses a class");
    }

    let observed = tally(&passwords);
    assert_eq!(observed.len(), alphabet.len(), "every character should appear");

    let filler = (LENGTH - classes) as f64 / alphabet.len() as f64;
    let statistic = chi_square(&observed, &alphabet, |c| {
        let class = CharacterClass::of(c).unwrap();
        RUNS as f64 * (1.0 / class.alphabet().len() as f64 + filler)
    });

    // 87 degrees of freedom; 150 is far beyond the 0.001 critical value (~134)
    assert!(statistic < 150.0, "chi-square too large: {statistic}");
}

/// With a single class every position is a uniform draw from that alphabet.
#[test]
fn test_single_class_is_flat() {
    const RUNS: usize = 5_000;
    const LENGTH: usize = 12;

    let options = PasswordOptions::from_classes([CharacterClass::Lowercase]);
    let alphabet = CharacterClass::Lowercase.alphabet();
    let mut rng = StdRng::seed_from_u64(26);

    let passwords: Vec<String> = (0..RUNS)
        .map(|_| generate_password_with_rng(&mut rng, LENGTH, &options).unwrap())
        .collect();

    let expected = (RUNS * LENGTH) as f64 / alphabet.len() as f64;
    let statistic = chi_square(&tally(&passwords), alphabet, |_| expected);

    // 25 degrees of freedom; 0.001 critical value is ~52.6
    assert!(statistic < 60.0, "chi-square too large: {statistic}");
}

/// Required characters must not cluster at the front.
#[test]
fn test_first_position_class_is_uniform() {
    const RUNS: usize = 10_000;

    let options = PasswordOptions::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut first: HashMap<CharacterClass, usize> = HashMap::new();

    for _ in 0..RUNS {
        let password = generate_password_with_rng(&mut rng, 4, &options).unwrap();
        let head = password.chars().next().and_then(CharacterClass::of).unwrap();
        *first.entry(head).or_insert(0) += 1;
    }

    for class in CharacterClass::ALL {
        let n = first.get(&class).copied().unwrap_or(0);
        assert!((2_300..=2_700).contains(&n), "{} first {n} times", class.name());
    }
}

/// Disabled classes never appear, whatever the combination.
#[test]
fn test_disabled_classes_never_appear() {
    let mut rng = StdRng::seed_from_u64(99);

    for mask in 1u8..16 {
        let options = PasswordOptions::from_classes(
            CharacterClass::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, class)| class),
        );
        let enabled = options.enabled_classes().len();

        for _ in 0..300 {
            let password = generate_password_with_rng(&mut rng, 8, &options).unwrap();
            let counts = ClassCounts::of(&password);
            assert!(counts.matches(&options), "mask {mask:04b}: {password}");
            assert_eq!(counts.present_classes().len(), enabled);
        }
    }
}
