//! Row-oriented data structures crossing the algorithm boundary.
//!
//! This module defines `Rating` and `RatingTable` (training data and
//! rating overrides), the per-user score maps returned by predictors,
//! the order-aligned `Predictions` produced by batch prediction, and the
//! `TrainingData` bundle handed to `Algorithm::fit`.
use std::collections::{HashMap, HashSet};
use std::ops::Index;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ItemId = i64;

/// A predicted score; `None` marks an item the model could not score.
pub type Score = Option<f64>;

/// Scores for one user, keyed by item id.
pub type ItemScores = HashMap<ItemId, Score>;

/// One user's own ratings, keyed by item id.
pub type UserRatings = HashMap<ItemId, f64>;

/// A single interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    /// Explicit rating or interaction weight; `None` for implicit feedback.
    pub rating: Option<f64>,
    pub timestamp: Option<i64>,
}

impl Rating {
    pub fn new(user: UserId, item: ItemId, rating: f64) -> Self {
        Rating {
            user,
            item,
            rating: Some(rating),
            timestamp: None,
        }
    }

    pub fn implicit(user: UserId, item: ItemId) -> Self {
        Rating {
            user,
            item,
            rating: None,
            timestamp: None,
        }
    }
}

/// An ordered table of interaction records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTable {
    rows: Vec<Rating>,
}

impl RatingTable {
    pub fn new(rows: Vec<Rating>) -> Self {
        RatingTable { rows }
    }

    /// Build an explicit-rating table from `(user, item, rating)` triples.
    pub fn from_triples(triples: &[(UserId, ItemId, f64)]) -> Self {
        triples
            .iter()
            .map(|&(user, item, rating)| Rating::new(user, item, rating))
            .collect()
    }

    pub fn push(&mut self, rating: Rating) {
        self.rows.push(rating);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Rating> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Rating] {
        &self.rows
    }

    /// Distinct users in order of first appearance.
    pub fn users(&self) -> Vec<UserId> {
        distinct(self.rows.iter().map(|r| r.user))
    }

    /// Distinct items in order of first appearance.
    pub fn items(&self) -> Vec<ItemId> {
        distinct(self.rows.iter().map(|r| r.item))
    }

    /// The `(user, item)` columns, in row order.
    pub fn pairs(&self) -> Vec<(UserId, ItemId)> {
        self.rows.iter().map(|r| (r.user, r.item)).collect()
    }

    /// Ratings of a single user, usable as a rating override.
    ///
    /// Implicit rows count as `1.0`. A repeated item keeps its last value.
    pub fn user_ratings(&self, user: UserId) -> UserRatings {
        self.rows
            .iter()
            .filter(|r| r.user == user)
            .map(|r| (r.item, r.rating.unwrap_or(1.0)))
            .collect()
    }
}

impl FromIterator<Rating> for RatingTable {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        RatingTable::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RatingTable {
    type Item = &'a Rating;
    type IntoIter = Iter<'a, Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn distinct<T: Copy + Eq + std::hash::Hash>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

/// Input to `Algorithm::fit`: the primary ratings plus any named auxiliary
/// tables a concrete algorithm declares it needs.
#[derive(Debug, Clone, Copy)]
pub struct TrainingData<'a> {
    pub ratings: &'a RatingTable,
    auxiliary: &'a [(&'a str, &'a RatingTable)],
}

impl<'a> TrainingData<'a> {
    pub fn new(ratings: &'a RatingTable) -> Self {
        TrainingData {
            ratings,
            auxiliary: &[],
        }
    }

    pub fn with_auxiliary(mut self, auxiliary: &'a [(&'a str, &'a RatingTable)]) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    pub fn auxiliary(&self, name: &str) -> Option<&'a RatingTable> {
        self.auxiliary
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, table)| *table)
    }
}

impl<'a> From<&'a RatingTable> for TrainingData<'a> {
    fn from(ratings: &'a RatingTable) -> Self {
        TrainingData::new(ratings)
    }
}

/// Scores aligned row-for-row with a list of `(user, item)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub name: String,
    values: Vec<Score>,
}

impl Predictions {
    pub fn new(values: Vec<Score>) -> Self {
        Predictions {
            name: "prediction".to_string(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<Score> {
        self.values.get(row).copied()
    }

    pub fn iter(&self) -> Iter<'_, Score> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Score] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Score> {
        self.values
    }

    /// Number of rows carrying the "no value" marker.
    pub fn missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

impl Index<usize> for Predictions {
    type Output = Score;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

/// One entry in a recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: ItemId,
    pub score: Option<f64>,
}

impl ScoredItem {
    pub fn new(item: ItemId, score: f64) -> Self {
        ScoredItem {
            item,
            score: Some(score),
        }
    }
}
