mod display;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use lotofacil_core::config::{Mode, WeightProfile, load_profile, save_profile};
use lotofacil_core::models::{Draw, HISTORY_LEN};
use lotofacil_core::parse::{parse_draw, parse_number_list};
use lotofacil_core::sampler::{date_seed, generate_games, make_rng, validate_game_count};
use lotofacil_core::stats::compute_stats;
use lotofacil_core::weights::{FrequencyTable, SelectionOptions, weight_table_with};

use crate::display::{display_draws, display_stats, display_suggestions, display_weights};

const HISTORY_LABELS: [&str; HISTORY_LEN] = ["Tirage 1", "Tirage 2", "Tirage 3"];
const CURRENT_LABEL: &str = "Résultat actuel";

#[derive(Parser)]
#[command(name = "lotofacil", about = "Suggestions pondérées pour la Lotofácil (15 numéros sur 25)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Les trois derniers tirages, saisis en ligne de commande ou demandés
/// interactivement s'ils manquent.
#[derive(Args)]
struct HistoryArgs {
    /// Tirage 1 : 15 numéros séparés par des virgules
    #[arg(long)]
    draw1: Option<String>,

    /// Tirage 2
    #[arg(long)]
    draw2: Option<String>,

    /// Tirage 3
    #[arg(long)]
    draw3: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Suggérer des grilles à partir des trois derniers tirages
    Suggest {
        #[command(flatten)]
        history: HistoryArgs,

        /// Résultat du jeu actuel (15 numéros)
        #[arg(long)]
        current: Option<String>,

        /// Mode de génération
        #[arg(short, long, default_value = "balanced")]
        mode: Mode,

        /// Profil de pondération JSON (remplace le mode)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Nombre de grilles à générer
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Seed pour la reproductibilité
        #[arg(long, conflicts_with = "daily_seed")]
        seed: Option<u64>,

        /// Seed dérivé de la date du jour
        #[arg(long)]
        daily_seed: bool,

        /// Numéros à écarter (séparés par des virgules)
        #[arg(short, long, default_value = "")]
        exclude: String,

        /// Numéros à favoriser (séparés par des virgules)
        #[arg(short, long, default_value = "")]
        include: String,

        /// Afficher la table de poids avant le tirage
        #[arg(long)]
        show_weights: bool,
    },

    /// Afficher les statistiques des trois derniers tirages
    Stats {
        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Exporter le profil de pondération d'un mode en JSON
    Profile {
        #[arg(short, long, default_value = "balanced")]
        mode: Mode,

        /// Fichier de sortie (stdout si absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Suggest {
            history,
            current,
            mode,
            profile,
            games,
            seed,
            daily_seed,
            exclude,
            include,
            show_weights,
        } => {
            let options = selection_options(mode, profile.as_deref(), &include, &exclude, games)?;
            let seed = if daily_seed { Some(date_seed()) } else { seed };
            cmd_suggest(history, current, &options, mode, games, seed, show_weights)
        }
        Command::Stats { history } => cmd_stats(history),
        Command::Profile { mode, output } => cmd_profile(mode, output.as_deref()),
    }
}

/// Contrôle les options de `suggest` avant toute saisie ou tout affichage.
fn selection_options(
    mode: Mode,
    profile: Option<&Path>,
    include: &str,
    exclude: &str,
    games: usize,
) -> Result<SelectionOptions> {
    validate_game_count(games)?;
    let profile = match profile {
        Some(path) => load_profile(path)?,
        None => mode.profile(),
    };
    let options = SelectionOptions {
        profile,
        include: parse_number_list(include, "Favoris")?,
        exclude: parse_number_list(exclude, "Exclusions")?,
    };
    options.validate()?;
    Ok(options)
}

fn cmd_suggest(
    history: HistoryArgs,
    current: Option<String>,
    options: &SelectionOptions,
    mode: Mode,
    games: usize,
    seed: Option<u64>,
    show_weights: bool,
) -> Result<()> {
    let history = read_history(history)?;
    let current = read_field(current, CURRENT_LABEL)?;

    display_draws(&history, Some(&current));

    if show_weights {
        let frequencies = FrequencyTable::from_draws(&history);
        let table = weight_table_with(&history, &current, options);
        display_weights(&table, &frequencies);
    }

    log::info!("Mode {mode}, {games} grille(s), seed {seed:?}");
    let mut rng = make_rng(seed);
    let suggestions = generate_games(&history, &current, options, games, &mut rng)?;
    display_suggestions(&suggestions, &current);
    Ok(())
}

fn cmd_stats(history: HistoryArgs) -> Result<()> {
    let history = read_history(history)?;
    display_draws(&history, None);
    let stats = compute_stats(&history);
    display_stats(&stats, history.len());
    Ok(())
}

fn cmd_profile(mode: Mode, output: Option<&Path>) -> Result<()> {
    let profile: WeightProfile = mode.profile();
    match output {
        Some(path) => {
            save_profile(&profile, path)?;
            println!("Profil {mode} sauvegardé dans {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&profile)?),
    }
    Ok(())
}

fn read_history(args: HistoryArgs) -> Result<[Draw; HISTORY_LEN]> {
    let [l1, l2, l3] = HISTORY_LABELS;
    Ok([
        read_field(args.draw1, l1)?,
        read_field(args.draw2, l2)?,
        read_field(args.draw3, l3)?,
    ])
}

/// Un champ fourni en argument est validé tel quel ; un champ absent est
/// demandé jusqu'à obtenir une saisie valide.
fn read_field(value: Option<String>, label: &str) -> Result<Draw> {
    if let Some(text) = value {
        return Ok(parse_draw(&text, label)?);
    }
    loop {
        let input = prompt(&format!("{label} (15 numéros séparés par des virgules, 1-25) : "))?;
        match parse_draw(&input, label) {
            Ok(draw) => return Ok(draw),
            Err(e) => println!("{e}. Réessayez."),
        }
    }
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        anyhow::bail!("Entrée standard fermée");
    }
    Ok(input.trim().to_string())
}
