//! reckit-algorithms: the algorithm protocol of a recommender-systems toolkit.
//!
//! This crate defines the capability traits shared by recommendation
//! algorithms (`Algorithm`, `Predictor`, `Recommender`), parameter
//! introspection, explicit state persistence, the `TopN` adapter that ranks
//! a predictor's scores, and CSV helpers for the rating tables crossing the
//! algorithm boundary.
//!
//! Concrete scoring models live outside this crate and plug in by
//! implementing the traits.
pub mod algorithms;
pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod params;
pub mod persist;

pub use algorithms::{adapt, Algorithm, Predictor, Recommender, TopN};
pub use data::{ItemId, ItemScores, Predictions, Rating, RatingTable, ScoredItem, TrainingData, UserId, UserRatings};
pub use error::{AlgorithmError, Result};
pub use params::{Param, ParamSet, ParamValue, Parameterized};
