use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use lotofacil_core::models::{Draw, Suggestion, join_numbers};
use lotofacil_core::stats::{DrawStats, NumberStats, band_label};
use lotofacil_core::weights::{FrequencyTable, WeightTable};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(history: &[Draw], current: Option<&Draw>) {
    let mut table = new_table(vec!["Tirage", "Numéros"]);
    for (i, draw) in history.iter().enumerate() {
        table.add_row(vec![format!("Tirage {}", i + 1), draw.to_string()]);
    }
    if let Some(current) = current {
        table.add_row(vec!["Résultat actuel".to_string(), current.to_string()]);
    }
    println!("{table}");
}

pub fn display_weights(weights: &WeightTable, frequencies: &FrequencyTable) {
    println!("\n⚖️  Pondération (moyenne des fréquences : {:.2})\n", frequencies.mean());

    let mut table = new_table(vec!["Numéro", "Fréquence", "Poids", "Probabilité 1er tirage"]);
    let total = weights.total().max(1) as f64;

    for &(number, weight) in weights.entries() {
        let prob = weight as f64 / total;
        let color = if prob > 1.0 / weights.len().max(1) as f64 {
            Color::Green
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", number)),
            Cell::new(frequencies.get(number).unwrap_or(0).to_string()),
            Cell::new(weight.to_string()),
            Cell::new(format!("{:.4}", prob)).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_suggestions(suggestions: &[Suggestion], current: &Draw) {
    println!("\n🎲 Numéros suggérés\n");

    let mut table = new_table(vec!["#", "Numéros", "Communs avec le résultat actuel"]);
    for (i, sug) in suggestions.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            sug.to_string(),
            sug.matches(current).to_string(),
        ]);
    }
    println!("{table}");

    if suggestions.iter().any(|s| !s.is_complete()) {
        println!("Attention : pool épuisé, certaines grilles ont moins de 15 numéros.");
    }
}

pub fn display_stats(stats: &DrawStats, n_draws: usize) {
    println!("\n📊 Statistiques sur les {} derniers tirages\n", n_draws);

    println!("── Fréquences ──");
    let mut table = new_table(vec!["Numéro", "Fréquence"]);
    for stat in &stats.frequencies {
        table.add_row(vec![format!("{:2}", stat.number), stat.frequency.to_string()]);
    }
    println!("{table}");

    println!("\nPlus sortis   : {}", format_top(&stats.most_drawn));
    println!("Moins sortis  : {}", format_top(&stats.least_drawn));

    println!("\n── Répartition par tranche ──");
    let mut table = new_table(vec!["Tranche", "Occurrences"]);
    for (i, count) in stats.bands.iter().enumerate() {
        table.add_row(vec![band_label(i), count.to_string()]);
    }
    println!("{table}");

    println!("\nPairs par tirage (moyenne)   : {:.1}", stats.mean_even);
    println!("Impairs par tirage (moyenne) : {:.1}", stats.mean_odd);
    println!("Suites consécutives          : {}", stats.run_count);
    println!("Longueur moyenne des suites  : {:.1}", stats.mean_run_length);
}

fn format_top(stats: &[NumberStats]) -> String {
    let numbers: Vec<u8> = stats.iter().map(|s| s.number).collect();
    join_numbers(&numbers)
}
