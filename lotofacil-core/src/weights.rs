use thiserror::Error;

use crate::config::WeightProfile;
use crate::models::{DRAW_SIZE, Draw, HISTORY_LEN, POOL_SIZE};

/// Nombre d'apparitions de chaque numéro dans les tirages historiques.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; POOL_SIZE as usize],
}

impl FrequencyTable {
    pub fn from_draws(draws: &[Draw]) -> Self {
        let mut counts = [0u32; POOL_SIZE as usize];
        for draw in draws {
            for &n in draw.numbers() {
                counts[(n - 1) as usize] += 1;
            }
        }
        Self { counts }
    }

    /// `None` hors de 1..=25.
    pub fn get(&self, number: u8) -> Option<u32> {
        let idx = usize::from(number).checked_sub(1)?;
        self.counts.get(idx).copied()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Somme des fréquences divisée par le nombre de tirages historiques
    /// (3), et non par la taille du pool.
    pub fn mean(&self) -> f64 {
        self.total() as f64 / HISTORY_LEN as f64
    }

    /// Paires (numéro, fréquence) de 1 à 25.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| (i as u8 + 1, c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Le numéro {0} ne peut pas être à la fois exclu et favori")]
    Conflict(u8),

    #[error("Seulement {remaining} numéros disponibles après exclusions (15 requis)")]
    TooFewCandidates { remaining: usize },
}

/// Paramètres d'une sélection : profil de pondération, numéros écartés du
/// pool et numéros favorisés.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    pub profile: WeightProfile,
    pub include: Vec<u8>,
    pub exclude: Vec<u8>,
}

impl SelectionOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(&n) = self.include.iter().find(|&n| self.exclude.contains(n)) {
            return Err(OptionsError::Conflict(n));
        }
        let remaining = (1..=POOL_SIZE).filter(|n| !self.exclude.contains(n)).count();
        if remaining < DRAW_SIZE {
            return Err(OptionsError::TooFewCandidates { remaining });
        }
        Ok(())
    }
}

/// Poids de chaque candidat encore présent, par ordre croissant de numéro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    entries: Vec<(u8, u32)>,
}

impl WeightTable {
    pub fn from_entries(entries: Vec<(u8, u32)>) -> Self {
        Self { entries }
    }

    pub fn weight(&self, number: u8) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == number)
            .map(|&(_, w)| w)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, w)| u64::from(w)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(u8, u32)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(u8, u32)> {
        self.entries
    }
}

/// Table de poids avec le profil par défaut, sans exclusions ni favoris.
pub fn weight_table(history: &[Draw; HISTORY_LEN], current: &Draw) -> WeightTable {
    weight_table_with(history, current, &SelectionOptions::default())
}

pub fn weight_table_with(
    history: &[Draw; HISTORY_LEN],
    current: &Draw,
    options: &SelectionOptions,
) -> WeightTable {
    let frequencies = FrequencyTable::from_draws(history);
    let mean = frequencies.mean();
    let profile = &options.profile;

    let entries = frequencies
        .iter()
        .filter(|(n, _)| !options.exclude.contains(n))
        .map(|(n, freq)| {
            let absent = !current.contains(n);
            let included = options.include.contains(&n);
            (n, candidate_weight(profile, freq, mean, absent, included))
        })
        .collect();

    WeightTable { entries }
}

/// Arithmétique saturante : un profil non validé ne peut pas faire
/// déborder un poids.
fn candidate_weight(profile: &WeightProfile, freq: u32, mean: f64, absent: bool, included: bool) -> u32 {
    let mut weight = profile.base;
    if included {
        weight = weight.saturating_add(profile.include_bonus);
    }
    if absent {
        weight = weight.saturating_add(profile.absent_bonus);
    }
    let freq = freq as f64;
    if freq > mean {
        let gap = (freq - mean).floor() as u32;
        weight = weight.saturating_add(profile.frequency_factor.saturating_mul(gap));
    } else if profile.cold_factor > 0 && freq < mean {
        let gap = (mean - freq).floor() as u32;
        weight = weight.saturating_add(profile.cold_factor.saturating_mul(gap));
    }
    weight
}
