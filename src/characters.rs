use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

const NUMPAD: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '-', '/', '*', '.',
];

/// The characters a practice session draws from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    /// digits plus the operator keys and the decimal point
    #[default]
    #[strum(serialize = "numpad")]
    Numpad,
    /// digits only
    #[strum(serialize = "digits")]
    Digits,
}

impl CharacterSet {
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharacterSet::Numpad => NUMPAD,
            CharacterSet::Digits => DIGITS,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars().contains(&c)
    }

    /// Whether a raw key maps onto a member of this set
    pub fn is_valid_input(&self, c: char) -> bool {
        self.contains(normalize_key(c))
    }
}

/// Map alternate spellings of the numpad keys onto their canonical character.
///
/// Multiplication is accepted as `x`, `X` or `×`, division as `÷`, and the
/// decimal key as `,` since several keyboard layouts emit a comma there.
pub fn normalize_key(c: char) -> char {
    match c {
        'x' | 'X' | '×' => '*',
        '÷' => '/',
        ',' => '.',
        other => other,
    }
}

/// Source of practice characters
pub trait CharacterProvider {
    fn next_char(&mut self) -> char;
    fn charset(&self) -> CharacterSet;
}

/// Uniformly random characters from a set
#[derive(Debug)]
pub struct RandomProvider {
    charset: CharacterSet,
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(charset: CharacterSet) -> Self {
        Self {
            charset,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(charset: CharacterSet, seed: u64) -> Self {
        Self {
            charset,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CharacterProvider for RandomProvider {
    fn next_char(&mut self) -> char {
        // the sets are non-empty constants
        *self.charset.chars().choose(&mut self.rng).unwrap_or(&'0')
    }

    fn charset(&self) -> CharacterSet {
        self.charset
    }
}

/// Cycles through a fixed sequence, for reproducible sessions
#[derive(Debug, Clone)]
pub struct SequenceProvider {
    charset: CharacterSet,
    sequence: Vec<char>,
    pos: usize,
}

impl SequenceProvider {
    /// Characters outside `charset` are dropped so the provider never yields
    /// something the session could not display. An empty result falls back
    /// to the whole set.
    pub fn new(charset: CharacterSet, sequence: &str) -> Self {
        let mut sequence: Vec<char> = sequence
            .chars()
            .map(normalize_key)
            .filter(|c| charset.contains(*c))
            .collect();
        if sequence.is_empty() {
            sequence = charset.chars().to_vec();
        }

        Self {
            charset,
            sequence,
            pos: 0,
        }
    }
}

impl CharacterProvider for SequenceProvider {
    fn next_char(&mut self) -> char {
        let c = self.sequence[self.pos % self.sequence.len()];
        self.pos += 1;
        c
    }

    fn charset(&self) -> CharacterSet {
        self.charset
    }
}
