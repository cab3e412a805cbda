pub mod ratings;

pub use ratings::{read_pairs, read_ratings, write_predictions};
