//! Algorithm capabilities.
//!
//! `Algorithm` is the base capability (fit, parameters, persistence).
//! `Predictor` scores items for a user and provides batched prediction over
//! arbitrary pairs. `Recommender` produces ranked lists; `adapt` upgrades a
//! predictor to a recommender through `TopN`.
pub mod algorithm;
pub mod predictor;
pub mod recommender;
pub mod top_n;

pub use algorithm::{Algorithm, AlgorithmObject};
pub use predictor::{group_pairs_by_user, Predictor, UserGroup};
pub use recommender::{adapt, Recommender};
pub use top_n::{TopN, UnratedItems};
