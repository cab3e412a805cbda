use crate::algorithms::algorithm::Algorithm;
use crate::algorithms::top_n::TopN;
use crate::data::{ItemId, ScoredItem, UserId, UserRatings};
use crate::error::Result;

/// Produces ranked item lists for users.
pub trait Recommender: Algorithm {
    /// Recommend items for `user`, best first.
    ///
    /// # Arguments
    ///
    /// * `n` - Maximum list length (`None` for unlimited)
    /// * `candidates` - Items eligible for recommendation; the algorithm's
    ///   own eligible set when `None`
    /// * `ratings` - The user's ratings, overriding or augmenting the model's
    ///   memorized preferences
    fn recommend(
        &self,
        user: UserId,
        n: Option<usize>,
        candidates: Option<&[ItemId]>,
        ratings: Option<&UserRatings>,
    ) -> Result<Vec<ScoredItem>>;
}

impl dyn Recommender {
    /// See [`adapt`].
    pub fn adapt(algorithm: Box<dyn Algorithm>) -> Box<dyn Recommender> {
        adapt(algorithm)
    }
}

/// Make a recommender out of any algorithm.
///
/// An algorithm that already recommends is returned as-is (same allocation).
/// Anything else is wrapped in [`TopN`], which ranks by the algorithm's
/// predicted scores and so needs it to be a `Predictor`.
pub fn adapt(algorithm: Box<dyn Algorithm>) -> Box<dyn Recommender> {
    match algorithm.into_recommender() {
        Ok(recommender) => {
            log::debug!("{} already recommends, using it directly", recommender.name());
            recommender
        }
        Err(algorithm) => {
            log::debug!("wrapping {} in TopN", algorithm.name());
            Box::new(TopN::new(algorithm))
        }
    }
}
