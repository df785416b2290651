use crate::models::Draw;
use crate::weights::FrequencyTable;

pub const BANDS: [(u8, u8); 5] = [(1, 5), (6, 10), (11, 15), (16, 20), (21, 25)];

const TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
}

/// Statistiques descriptives d'une série de tirages.
#[derive(Debug, Clone)]
pub struct DrawStats {
    pub frequencies: Vec<NumberStats>,
    pub most_drawn: Vec<NumberStats>,
    pub least_drawn: Vec<NumberStats>,
    /// Occurrences cumulées par tranche, dans l'ordre de `BANDS`.
    pub bands: [u32; 5],
    pub mean_even: f64,
    pub mean_odd: f64,
    pub run_count: usize,
    pub mean_run_length: f64,
}

pub fn compute_stats(draws: &[Draw]) -> DrawStats {
    let table = FrequencyTable::from_draws(draws);
    let frequencies: Vec<NumberStats> = table
        .iter()
        .map(|(number, frequency)| NumberStats { number, frequency })
        .collect();

    // Tri stable : à fréquence égale, l'ordre croissant des numéros est conservé.
    let mut most_drawn = frequencies.clone();
    most_drawn.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    most_drawn.truncate(TOP_N);

    let mut least_drawn = frequencies.clone();
    least_drawn.sort_by(|a, b| a.frequency.cmp(&b.frequency));
    least_drawn.truncate(TOP_N);

    let mut bands = [0u32; 5];
    let mut even = 0u32;
    let mut odd = 0u32;
    let mut runs: Vec<usize> = Vec::new();

    for draw in draws {
        for &n in draw.numbers() {
            if let Some(i) = BANDS.iter().position(|&(lo, hi)| (lo..=hi).contains(&n)) {
                bands[i] += 1;
            }
            if n % 2 == 0 {
                even += 1;
            } else {
                odd += 1;
            }
        }
        runs.extend(consecutive_runs(draw.numbers()));
    }

    let n_draws = draws.len().max(1) as f64;
    let mean_run_length = if runs.is_empty() {
        0.0
    } else {
        runs.iter().sum::<usize>() as f64 / runs.len() as f64
    };

    DrawStats {
        frequencies,
        most_drawn,
        least_drawn,
        bands,
        mean_even: even as f64 / n_draws,
        mean_odd: odd as f64 / n_draws,
        run_count: runs.len(),
        mean_run_length,
    }
}

/// Longueurs des suites de numéros consécutifs (au moins 2) dans une liste triée.
fn consecutive_runs(sorted: &[u8]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 1;
    for w in sorted.windows(2) {
        if w[1] == w[0] + 1 {
            current += 1;
        } else {
            if current >= 2 {
                runs.push(current);
            }
            current = 1;
        }
    }
    if current >= 2 {
        runs.push(current);
    }
    runs
}

pub fn band_label(i: usize) -> String {
    let (lo, hi) = BANDS[i];
    format!("{lo}-{hi}")
}
