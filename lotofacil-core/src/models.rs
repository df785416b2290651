use std::fmt;

/// Plus grand numéro jouable (les numéros vont de 1 à `POOL_SIZE`).
pub const POOL_SIZE: u8 = 25;

/// Nombre de numéros dans un tirage comme dans une grille suggérée.
pub const DRAW_SIZE: usize = 15;

/// Nombre de tirages historiques analysés.
pub const HISTORY_LEN: usize = 3;

/// Un tirage validé : 15 numéros distincts entre 1 et 25, triés.
///
/// Les champs sont privés : un `Draw` ne s'obtient que via
/// [`Draw::from_numbers`] ou [`crate::parse::parse_draw`], ce qui garantit
/// l'invariant pour tout le reste de la crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Draw {
    numbers: [u8; DRAW_SIZE],
}

impl Draw {
    pub(crate) fn from_sorted_unchecked(numbers: [u8; DRAW_SIZE]) -> Self {
        debug_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        Self { numbers }
    }

    pub fn numbers(&self) -> &[u8; DRAW_SIZE] {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    /// Numéros de 1 à 25 absents de ce tirage.
    pub fn complement(&self) -> Vec<u8> {
        (1..=POOL_SIZE).filter(|&n| !self.contains(n)).collect()
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_numbers(&self.numbers))
    }
}

/// Grille suggérée, triée par ordre croissant.
///
/// Contient normalement `DRAW_SIZE` numéros, moins si le pool de candidats
/// a été épuisé avant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub numbers: Vec<u8>,
}

impl Suggestion {
    pub fn is_complete(&self) -> bool {
        self.numbers.len() == DRAW_SIZE
    }

    /// Nombre de numéros communs avec un tirage.
    pub fn matches(&self, draw: &Draw) -> usize {
        self.numbers.iter().filter(|&&n| draw.contains(n)).count()
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_numbers(&self.numbers))
    }
}

pub fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}
