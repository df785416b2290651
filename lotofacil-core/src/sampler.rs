use anyhow::{Result, bail};
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{DRAW_SIZE, Draw, HISTORY_LEN, Suggestion};
use crate::weights::{SelectionOptions, WeightTable, weight_table_with};

pub const MAX_GAMES: usize = 10;

/// Seed déterministe basé sur la date du jour (YYYYMMDD).
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Suggère 15 numéros avec le profil équilibré.
pub fn select_numbers<R: Rng + ?Sized>(
    history: &[Draw; HISTORY_LEN],
    current: &Draw,
    rng: &mut R,
) -> Suggestion {
    select_numbers_with(history, current, &SelectionOptions::default(), rng)
}

pub fn select_numbers_with<R: Rng + ?Sized>(
    history: &[Draw; HISTORY_LEN],
    current: &Draw,
    options: &SelectionOptions,
    rng: &mut R,
) -> Suggestion {
    let table = weight_table_with(history, current, options);
    log::debug!("Table de poids : {:?} (total {})", table.entries(), table.total());
    Suggestion {
        numbers: sample_without_replacement(table, DRAW_SIZE, rng),
    }
}

/// Tirage par roulette sans remise.
///
/// À chaque tour, `r` est tiré uniformément dans `[1, total]` et le premier
/// candidat dont le poids cumulé atteint `r` est retiré du pool. S'arrête
/// plus tôt si le pool s'épuise ; le résultat est trié.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    table: WeightTable,
    count: usize,
    rng: &mut R,
) -> Vec<u8> {
    let mut available = table.into_entries();
    let mut selected = Vec::with_capacity(count.min(available.len()));

    while selected.len() < count && !available.is_empty() {
        let total: u64 = available.iter().map(|&(_, w)| u64::from(w)).sum();
        if total == 0 {
            log::warn!("Poids tous nuls, arrêt après {} numéros", selected.len());
            break;
        }
        let r = rng.random_range(1..=total);

        let mut cumulative = 0u64;
        let idx = available
            .iter()
            .position(|&(_, w)| {
                cumulative += u64::from(w);
                cumulative >= r
            })
            .unwrap_or(available.len() - 1);

        let (number, _) = available.remove(idx);
        selected.push(number);
    }

    if selected.len() < count {
        log::warn!("Pool épuisé : {} numéros sur {}", selected.len(), count);
    }

    selected.sort_unstable();
    selected
}

pub fn validate_game_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_GAMES {
        bail!("Le nombre de grilles doit être compris entre 1 et {MAX_GAMES} (reçu {count})");
    }
    Ok(())
}

/// Plusieurs grilles à partir des mêmes tirages, avec le même générateur.
pub fn generate_games<R: Rng + ?Sized>(
    history: &[Draw; HISTORY_LEN],
    current: &Draw,
    options: &SelectionOptions,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Suggestion>> {
    validate_game_count(count)?;
    options.validate()?;
    options.profile.validate()?;

    let games = (0..count)
        .map(|_| select_numbers_with(history, current, options, rng))
        .collect::<Vec<_>>();
    log::info!("{} grille(s) générée(s)", games.len());
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, WeightProfile};
    use rand::RngCore;

    /// Générateur qui ne produit que des zéros : chaque tirage uniforme
    /// renvoie la borne basse, soit `r = 1`.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn draw(values: impl IntoIterator<Item = u8>) -> Draw {
        let v: Vec<i64> = values.into_iter().map(i64::from).collect();
        Draw::from_numbers("test", &v).unwrap()
    }

    fn sample_history() -> ([Draw; 3], Draw) {
        (
            [draw(1..=15), draw(6..=20), draw(11..=25)],
            draw([1, 3, 4, 6, 8, 9, 12, 13, 15, 17, 19, 20, 22, 24, 25]),
        )
    }

    fn assert_valid(s: &Suggestion) {
        assert_eq!(s.numbers.len(), DRAW_SIZE);
        assert!(s.numbers.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon : {:?}", s.numbers);
        assert!(s.numbers.iter().all(|&n| (1..=25).contains(&n)));
    }

    #[test]
    fn test_output_is_valid() {
        let (history, current) = sample_history();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let s = select_numbers(&history, &current, &mut rng);
            assert_valid(&s);
        }
    }

    #[test]
    fn test_min_rng_picks_first_candidate() {
        let (history, current) = sample_history();
        let s = select_numbers(&history, &current, &mut ZeroRng);
        assert_eq!(s.numbers, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_min_rng_respects_pool_order() {
        let table = WeightTable::from_entries(vec![(9, 1), (4, 3), (20, 2)]);
        let picked = sample_without_replacement(table, 2, &mut ZeroRng);
        assert_eq!(picked, vec![4, 9]);
    }

    #[test]
    fn test_exhaustion_returns_short_result() {
        let table = WeightTable::from_entries((1..=10).map(|n| (n, 2)).collect());
        let mut rng = StdRng::seed_from_u64(7);
        let picked = sample_without_replacement(table, DRAW_SIZE, &mut rng);
        assert_eq!(picked, (1..=10).collect::<Vec<u8>>());

        let empty = sample_without_replacement(WeightTable::from_entries(vec![]), DRAW_SIZE, &mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_seed_determinism() {
        let (history, current) = sample_history();
        let a = select_numbers(&history, &current, &mut StdRng::seed_from_u64(123));
        let b = select_numbers(&history, &current, &mut StdRng::seed_from_u64(123));
        assert_eq!(a, b);
        assert_eq!(make_rng(Some(5)).next_u64(), make_rng(Some(5)).next_u64());
    }

    #[test]
    fn test_heavier_numbers_selected_more_often() {
        let d = draw(1..=15);
        let history = [d, d, d];
        let current = draw(11..=25);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 26];
        for _ in 0..500 {
            for n in select_numbers(&history, &current, &mut rng).numbers {
                counts[n as usize] += 1;
            }
        }
        let heavy: u32 = counts[1..=10].iter().sum();
        let light: u32 = counts[11..=20].iter().sum();
        assert!(heavy > light, "poids 6 : {heavy}, poids 1 : {light}");
    }

    #[test]
    fn test_excluded_numbers_never_selected() {
        let (history, current) = sample_history();
        let options = SelectionOptions {
            exclude: vec![2, 5, 7, 11, 23],
            ..SelectionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let s = select_numbers_with(&history, &current, &options, &mut rng);
            assert_valid(&s);
            assert!(s.numbers.iter().all(|n| !options.exclude.contains(n)));
        }
    }

    #[test]
    fn test_exclusions_leaving_fifteen_forces_result() {
        let (history, current) = sample_history();
        let options = SelectionOptions {
            exclude: (16..=25).collect(),
            ..SelectionOptions::default()
        };
        let s = select_numbers_with(&history, &current, &options, &mut StdRng::seed_from_u64(1));
        assert_eq!(s.numbers, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_generate_games_count() {
        let (history, current) = sample_history();
        let options = SelectionOptions {
            profile: Mode::Aggressive.profile(),
            ..SelectionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let games = generate_games(&history, &current, &options, 3, &mut rng).unwrap();
        assert_eq!(games.len(), 3);
        games.iter().for_each(assert_valid);
    }

    #[test]
    fn test_generate_games_rejects_bad_input() {
        let (history, current) = sample_history();
        let mut rng = StdRng::seed_from_u64(3);
        let options = SelectionOptions::default();
        assert!(generate_games(&history, &current, &options, 0, &mut rng).is_err());
        assert!(generate_games(&history, &current, &options, MAX_GAMES + 1, &mut rng).is_err());

        let too_many = SelectionOptions {
            exclude: (1..=12).collect(),
            ..SelectionOptions::default()
        };
        assert!(generate_games(&history, &current, &too_many, 1, &mut rng).is_err());
    }

    #[test]
    fn test_generate_games_rejects_oversized_profile() {
        let (history, current) = sample_history();
        let options = SelectionOptions {
            profile: WeightProfile {
                include_bonus: 200_000_000,
                ..WeightProfile::default()
            },
            include: (1..=25).collect(),
            ..SelectionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_games(&history, &current, &options, 1, &mut rng).is_err());
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let (history, current) = sample_history();
        let options = SelectionOptions {
            profile: WeightProfile {
                include_bonus: u32::MAX,
                ..WeightProfile::default()
            },
            include: (1..=25).collect(),
            ..SelectionOptions::default()
        };
        let table = weight_table_with(&history, &current, &options);
        assert_eq!(table.total(), 25 * u64::from(u32::MAX));

        for seed in 0..20 {
            let s = select_numbers_with(&history, &current, &options, &mut StdRng::seed_from_u64(seed));
            assert_valid(&s);
        }
        let s = select_numbers_with(&history, &current, &options, &mut ZeroRng);
        assert_eq!(s.numbers, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_validate_game_count_bounds() {
        assert!(validate_game_count(1).is_ok());
        assert!(validate_game_count(MAX_GAMES).is_ok());
        assert!(validate_game_count(0).is_err());
        assert!(validate_game_count(MAX_GAMES + 1).is_err());
    }

    #[test]
    fn test_date_seed_format() {
        let seed = date_seed();
        assert_eq!(seed.to_string().len(), 8, "seed devrait avoir 8 chiffres: {seed}");
    }
}
