use std::collections::HashSet;

use indexmap::IndexMap;

use crate::algorithms::algorithm::Algorithm;
use crate::data::{ItemId, ItemScores, Predictions, RatingTable, Score, UserId, UserRatings};
use crate::error::{AlgorithmError, Result};

/// Predicts user scores for items.
///
/// Scores are estimates of preference; no guarantee is made about their
/// scale or granularity.
pub trait Predictor: Algorithm {
    /// Score `items` for `user`.
    ///
    /// The returned map holds every requested item. Items the model cannot
    /// score map to `None`. `ratings`, when given, replaces or augments the
    /// model's memorized ratings for this user. Must not modify fitted state.
    fn predict_for_user(
        &self,
        user: UserId,
        items: &[ItemId],
        ratings: Option<&UserRatings>,
    ) -> Result<ItemScores>;

    /// Score arbitrary `(user, item)` pairs.
    ///
    /// Pairs are grouped by user (first-appearance order), each group is
    /// scored with one `predict_for_user` call, and the results are returned
    /// in the original row order. An error for any user aborts the batch.
    /// The default implementation does not accept a rating override.
    fn predict(&self, pairs: &[(UserId, ItemId)], ratings: Option<&RatingTable>) -> Result<Predictions> {
        if ratings.is_some() {
            return Err(AlgorithmError::Unsupported {
                feature: "rating overrides in batch prediction",
            });
        }

        let groups = group_pairs_by_user(pairs);
        log::debug!(
            "{}: predicting {} pairs for {} users",
            self.name(),
            pairs.len(),
            groups.len()
        );

        let mut values: Vec<Score> = vec![None; pairs.len()];
        for (user, group) in &groups {
            log::trace!("{}: scoring {} items for user {}", self.name(), group.items.len(), user);
            let scores = self.predict_for_user(*user, &group.items, None)?;
            for &row in &group.rows {
                let (_, item) = pairs[row];
                values[row] = scores.get(&item).copied().flatten();
            }
        }

        Ok(Predictions::new(values))
    }
}

/// The rows of one user within a pair list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserGroup {
    /// Distinct requested items, in first-appearance order.
    pub items: Vec<ItemId>,
    /// Input row indices belonging to this user, ascending.
    pub rows: Vec<usize>,
}

/// Partition `pairs` by user, keeping users in order of first appearance.
pub fn group_pairs_by_user(pairs: &[(UserId, ItemId)]) -> IndexMap<UserId, UserGroup> {
    let mut groups: IndexMap<UserId, UserGroup> = IndexMap::new();
    let mut seen = HashSet::new();
    for (row, &(user, item)) in pairs.iter().enumerate() {
        let group = groups.entry(user).or_default();
        if seen.insert((user, item)) {
            group.items.push(item);
        }
        group.rows.push(row);
    }
    groups
}
