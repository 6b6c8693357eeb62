//! Tarot draws and I Ching casts.
//!
//! Divination is the one place chance enters the engine, so the random
//! source is always injected by the caller. A fixed-seed `StdRng` makes
//! every draw reproducible, which is how the tests pin results down.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 22 major arcana, in deck order.
pub const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// One card out of a spread, upright or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawnCard {
    pub number: u8,
    pub reversed: bool,
}

impl DrawnCard {
    pub fn name(&self) -> &'static str {
        MAJOR_ARCANA[self.number as usize]
    }
}

impl fmt::Display for DrawnCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.reversed {
            write!(f, "{} (reversed)", self.name())
        } else {
            write!(f, "{}", self.name())
        }
    }
}

/// Draws `count` distinct major arcana, each independently upright or
/// reversed.
pub fn draw_tarot<R: Rng>(rng: &mut R, count: usize) -> Vec<DrawnCard> {
    let mut deck: Vec<u8> = (0..MAJOR_ARCANA.len() as u8).collect();
    deck.shuffle(rng);
    deck.truncate(count.min(MAJOR_ARCANA.len()));
    deck.into_iter()
        .map(|number| DrawnCard {
            number,
            reversed: rng.gen_bool(0.5),
        })
        .collect()
}

/// A three-card past/present/future spread.
pub fn three_card_spread<R: Rng>(rng: &mut R) -> [DrawnCard; 3] {
    let cards = draw_tarot(rng, 3);
    [cards[0], cards[1], cards[2]]
}

/// The eight trigrams.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigram {
    Qian,
    Dui,
    Li,
    Zhen,
    Xun,
    Kan,
    Gen,
    Kun,
}

impl Trigram {
    /// Trigram from three lines, bottom first; `true` is yang.
    pub fn from_lines(lines: [bool; 3]) -> Trigram {
        match lines {
            [true, true, true] => Trigram::Qian,
            [true, true, false] => Trigram::Dui,
            [true, false, true] => Trigram::Li,
            [true, false, false] => Trigram::Zhen,
            [false, true, true] => Trigram::Xun,
            [false, true, false] => Trigram::Kan,
            [false, false, true] => Trigram::Gen,
            [false, false, false] => Trigram::Kun,
        }
    }

    pub fn image(self) -> &'static str {
        match self {
            Trigram::Qian => "Heaven",
            Trigram::Dui => "Lake",
            Trigram::Li => "Fire",
            Trigram::Zhen => "Thunder",
            Trigram::Xun => "Wind",
            Trigram::Kan => "Water",
            Trigram::Gen => "Mountain",
            Trigram::Kun => "Earth",
        }
    }

    fn column(self) -> usize {
        match self {
            Trigram::Qian => 0,
            Trigram::Dui => 1,
            Trigram::Li => 2,
            Trigram::Zhen => 3,
            Trigram::Xun => 4,
            Trigram::Kan => 5,
            Trigram::Gen => 6,
            Trigram::Kun => 7,
        }
    }
}

/// King Wen numbers indexed by (lower, upper) trigram.
const KING_WEN: [[u8; 8]; 8] = [
    [1, 43, 14, 34, 9, 5, 26, 11],
    [10, 58, 38, 54, 61, 60, 41, 19],
    [13, 49, 30, 55, 37, 63, 22, 36],
    [25, 17, 21, 51, 42, 3, 27, 24],
    [44, 28, 50, 32, 57, 48, 18, 46],
    [6, 47, 64, 40, 59, 29, 4, 7],
    [33, 31, 56, 62, 53, 39, 52, 15],
    [12, 45, 35, 16, 20, 8, 23, 2],
];

/// Hexagram names in King Wen order, 1-64.
const HEXAGRAM_NAMES: [&str; 64] = [
    "The Creative",
    "The Receptive",
    "Difficulty at the Beginning",
    "Youthful Folly",
    "Waiting",
    "Conflict",
    "The Army",
    "Holding Together",
    "Small Taming",
    "Treading",
    "Peace",
    "Standstill",
    "Fellowship",
    "Great Possession",
    "Modesty",
    "Enthusiasm",
    "Following",
    "Work on the Decayed",
    "Approach",
    "Contemplation",
    "Biting Through",
    "Grace",
    "Splitting Apart",
    "Return",
    "Innocence",
    "Great Taming",
    "Nourishment",
    "Great Exceeding",
    "The Abysmal",
    "The Clinging",
    "Influence",
    "Duration",
    "Retreat",
    "Great Power",
    "Progress",
    "Darkening of the Light",
    "The Family",
    "Opposition",
    "Obstruction",
    "Deliverance",
    "Decrease",
    "Increase",
    "Breakthrough",
    "Coming to Meet",
    "Gathering",
    "Pushing Upward",
    "Oppression",
    "The Well",
    "Revolution",
    "The Cauldron",
    "The Arousing",
    "Keeping Still",
    "Development",
    "The Marrying Maiden",
    "Abundance",
    "The Wanderer",
    "The Gentle",
    "The Joyous",
    "Dispersion",
    "Limitation",
    "Inner Truth",
    "Small Exceeding",
    "After Completion",
    "Before Completion",
];

/// Six line values from the three-coin method, bottom first. Each value
/// is 6-9: old yin, young yang, young yin, old yang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    pub lines: [u8; 6],
}

impl Hexagram {
    pub fn from_lines(lines: [u8; 6]) -> Hexagram {
        Hexagram { lines }
    }

    fn yang_pattern(&self) -> [bool; 6] {
        let mut pattern = [false; 6];
        for (slot, &line) in pattern.iter_mut().zip(self.lines.iter()) {
            *slot = line % 2 == 1;
        }
        pattern
    }

    pub fn lower_trigram(&self) -> Trigram {
        let p = self.yang_pattern();
        Trigram::from_lines([p[0], p[1], p[2]])
    }

    pub fn upper_trigram(&self) -> Trigram {
        let p = self.yang_pattern();
        Trigram::from_lines([p[3], p[4], p[5]])
    }

    pub fn king_wen_number(&self) -> u8 {
        KING_WEN[self.lower_trigram().column()][self.upper_trigram().column()]
    }

    pub fn name(&self) -> &'static str {
        HEXAGRAM_NAMES[self.king_wen_number() as usize - 1]
    }

    /// Positions (bottom-first, 0-based) of the moving lines.
    pub fn moving_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|&(_, &line)| line == 6 || line == 9)
            .map(|(position, _)| position)
            .collect()
    }

    /// The hexagram this one transforms into, if any line moves: old yin
    /// becomes yang and old yang becomes yin.
    pub fn transformed(&self) -> Option<Hexagram> {
        if self.moving_lines().is_empty() {
            return None;
        }
        let mut lines = self.lines;
        for line in lines.iter_mut() {
            *line = match *line {
                6 => 7,
                9 => 8,
                other => other,
            };
        }
        Some(Hexagram { lines })
    }
}

impl fmt::Display for Hexagram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} {} ({} over {})",
            self.king_wen_number(),
            self.name(),
            self.upper_trigram().image(),
            self.lower_trigram().image()
        )
    }
}

/// A full cast: the primary hexagram and its transformation, if any line
/// moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cast {
    pub primary: Hexagram,
    pub transformed: Option<Hexagram>,
}

/// One line by three coins: heads count 3, tails 2, summed to 6-9.
fn cast_line<R: Rng>(rng: &mut R) -> u8 {
    (0..3).map(|_| if rng.gen_bool(0.5) { 3 } else { 2 }).sum()
}

/// Casts six lines bottom-up and resolves the transformation.
pub fn cast_hexagram<R: Rng>(rng: &mut R) -> Cast {
    let mut lines = [0u8; 6];
    for line in lines.iter_mut() {
        *line = cast_line(rng);
    }
    let primary = Hexagram::from_lines(lines);
    Cast {
        transformed: primary.transformed(),
        primary,
    }
}
