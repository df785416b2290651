use thiserror::Error;

use crate::models::{DRAW_SIZE, Draw, POOL_SIZE};

/// Erreur de saisie, toujours rattachée au champ fautif.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("{field} : saisissez 15 numéros séparés par des virgules")]
    Empty { field: String },

    #[error("{field} : exactement 15 numéros attendus, {found} reçus")]
    WrongCount { field: String, found: usize },

    #[error("{field} : « {token} » n'est pas un nombre entier")]
    NotInteger { field: String, token: String },

    #[error("{field} : le numéro {value} est hors limites (1-25)")]
    OutOfRange { field: String, value: i64 },

    #[error("{field} : le numéro {value} apparaît plusieurs fois")]
    Duplicate { field: String, value: u8 },
}

impl DrawError {
    pub fn field(&self) -> &str {
        match self {
            DrawError::Empty { field }
            | DrawError::WrongCount { field, .. }
            | DrawError::NotInteger { field, .. }
            | DrawError::OutOfRange { field, .. }
            | DrawError::Duplicate { field, .. } => field,
        }
    }
}

impl Draw {
    /// Construit un tirage à partir de valeurs brutes, dans l'ordre de saisie.
    ///
    /// Les contrôles s'appliquent valeur par valeur : d'abord la plage,
    /// puis les doublons. La première violation est renvoyée.
    pub fn from_numbers(field: &str, values: &[i64]) -> Result<Draw, DrawError> {
        if values.len() != DRAW_SIZE {
            return Err(DrawError::WrongCount {
                field: field.to_string(),
                found: values.len(),
            });
        }
        let checked = check_values(field, values.iter().copied())?;
        let mut numbers = [0u8; DRAW_SIZE];
        numbers.copy_from_slice(&checked);
        numbers.sort_unstable();
        Ok(Draw::from_sorted_unchecked(numbers))
    }
}

/// Analyse une saisie du type `"1, 2, 3, ..."` en tirage validé.
pub fn parse_draw(text: &str, field: &str) -> Result<Draw, DrawError> {
    let tokens = split_tokens(text);
    if tokens.is_empty() {
        return Err(DrawError::Empty {
            field: field.to_string(),
        });
    }
    if tokens.len() != DRAW_SIZE {
        return Err(DrawError::WrongCount {
            field: field.to_string(),
            found: tokens.len(),
        });
    }

    let mut numbers = [0u8; DRAW_SIZE];
    let mut seen = [false; POOL_SIZE as usize + 1];
    for (slot, token) in numbers.iter_mut().zip(tokens) {
        let value = parse_token(field, token)?;
        *slot = check_number(field, value, &mut seen)?;
    }
    numbers.sort_unstable();
    Ok(Draw::from_sorted_unchecked(numbers))
}

/// Liste libre de numéros (exclusions, numéros favoris). Une saisie vide
/// donne une liste vide.
pub fn parse_number_list(text: &str, field: &str) -> Result<Vec<u8>, DrawError> {
    let tokens = split_tokens(text);
    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        values.push(parse_token(field, token)?);
    }
    let mut numbers = check_values(field, values.into_iter())?;
    numbers.sort_unstable();
    Ok(numbers)
}

fn split_tokens(text: &str) -> Vec<&str> {
    let text = text.trim().trim_end_matches(',');
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::trim).collect()
}

fn parse_token(field: &str, token: &str) -> Result<i64, DrawError> {
    token.parse::<i64>().map_err(|_| DrawError::NotInteger {
        field: field.to_string(),
        token: token.to_string(),
    })
}

fn check_values(field: &str, values: impl Iterator<Item = i64>) -> Result<Vec<u8>, DrawError> {
    let mut seen = [false; POOL_SIZE as usize + 1];
    values
        .map(|value| check_number(field, value, &mut seen))
        .collect()
}

fn check_number(field: &str, value: i64, seen: &mut [bool]) -> Result<u8, DrawError> {
    if !(1..=i64::from(POOL_SIZE)).contains(&value) {
        return Err(DrawError::OutOfRange {
            field: field.to_string(),
            value,
        });
    }
    let number = value as u8;
    if seen[number as usize] {
        return Err(DrawError::Duplicate {
            field: field.to_string(),
            value: number,
        });
    }
    seen[number as usize] = true;
    Ok(number)
}
