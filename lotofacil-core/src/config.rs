use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Balanced,
    Conservative,
    Aggressive,
}

impl Mode {
    pub fn profile(&self) -> WeightProfile {
        match self {
            Mode::Balanced => WeightProfile::default(),
            Mode::Conservative => WeightProfile {
                absent_bonus: 3,
                frequency_factor: 5,
                ..WeightProfile::default()
            },
            Mode::Aggressive => WeightProfile {
                absent_bonus: 7,
                frequency_factor: 1,
                cold_factor: 4,
                ..WeightProfile::default()
            },
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Balanced => write!(f, "équilibré"),
            Mode::Conservative => write!(f, "conservateur"),
            Mode::Aggressive => write!(f, "agressif"),
        }
    }
}

/// Constantes de la formule de pondération.
///
/// `base` est le poids plancher de tout candidat, `absent_bonus` s'ajoute aux
/// numéros absents du résultat actuel, `frequency_factor` multiplie l'écart
/// (tronqué) à la moyenne pour les numéros au-dessus, `cold_factor` fait de
/// même pour ceux en dessous, `include_bonus` favorise les numéros imposés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub base: u32,
    pub absent_bonus: u32,
    pub frequency_factor: u32,
    pub cold_factor: u32,
    pub include_bonus: u32,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self {
            base: 1,
            absent_bonus: 5,
            frequency_factor: 2,
            cold_factor: 0,
            include_bonus: 20,
        }
    }
}

/// Plafond de chaque constante d'un profil. Avec un écart de fréquence
/// d'au plus 15, le poids d'un candidat reste sous 200 000 et le total des
/// 25 candidats tient largement dans un `u32`.
pub const MAX_PROFILE_VALUE: u32 = 10_000;

impl WeightProfile {
    pub fn validate(&self) -> Result<()> {
        if self.base == 0 {
            bail!("Profil invalide : le poids de base doit être au moins 1");
        }
        let fields = [
            ("base", self.base),
            ("absent_bonus", self.absent_bonus),
            ("frequency_factor", self.frequency_factor),
            ("cold_factor", self.cold_factor),
            ("include_bonus", self.include_bonus),
        ];
        for (name, value) in fields {
            if value > MAX_PROFILE_VALUE {
                bail!("Profil invalide : {name} = {value} dépasse {MAX_PROFILE_VALUE}");
            }
        }
        Ok(())
    }
}

pub fn load_profile(path: &Path) -> Result<WeightProfile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let profile: WeightProfile = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {}", path.display()))?;
    profile.validate()?;
    log::debug!("Profil chargé depuis {}: {:?}", path.display(), profile);
    Ok(profile)
}

pub fn save_profile(profile: &WeightProfile, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(())
}
