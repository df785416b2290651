pub mod config;
pub mod models;
pub mod parse;
pub mod sampler;
pub mod stats;
pub mod weights;

pub use models::{DRAW_SIZE, Draw, HISTORY_LEN, POOL_SIZE, Suggestion};
pub use parse::{DrawError, parse_draw, parse_number_list};
pub use sampler::{generate_games, select_numbers, select_numbers_with};
pub use weights::{SelectionOptions, weight_table, weight_table_with};
