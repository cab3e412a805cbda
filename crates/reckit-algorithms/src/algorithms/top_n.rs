//! Top-N recommendation from predicted scores.
//!
//! `TopN` turns any `Predictor` into a `Recommender`: it scores a user's
//! candidate items and keeps the best `n`. Candidates default to the items
//! the user has not rated, as tracked by `UnratedItems`.
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::algorithms::algorithm::Algorithm;
use crate::algorithms::predictor::Predictor;
use crate::algorithms::recommender::Recommender;
use crate::data::{ItemId, ItemScores, RatingTable, ScoredItem, TrainingData, UserId, UserRatings};
use crate::error::{AlgorithmError, Result};
use crate::params::{Param, Parameterized};
use crate::persist::AlgorithmState;

/// Candidate selector returning the items a user has not rated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnratedItems {
    items: Vec<ItemId>,
    user_items: HashMap<UserId, HashSet<ItemId>>,
}

impl UnratedItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memorize the item universe and each user's rated items.
    pub fn fit(&mut self, ratings: &RatingTable) {
        self.items = ratings.items();
        self.user_items.clear();
        for r in ratings {
            self.user_items.entry(r.user).or_default().insert(r.item);
        }
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Items eligible for `user`.
    ///
    /// When `ratings` is given, its items are excluded instead of the
    /// user's training items.
    pub fn candidates(&self, user: UserId, ratings: Option<&UserRatings>) -> Vec<ItemId> {
        match ratings {
            Some(ratings) => self
                .items
                .iter()
                .copied()
                .filter(|item| !ratings.contains_key(item))
                .collect(),
            None => {
                let rated = self.user_items.get(&user);
                self.items
                    .iter()
                    .copied()
                    .filter(|item| rated.map_or(true, |r| !r.contains(item)))
                    .collect()
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TopNState {
    predictor: AlgorithmState,
    selector: UnratedItems,
}

/// Recommend the highest-scoring candidates of a wrapped predictor.
pub struct TopN {
    predictor: Box<dyn Algorithm>,
    selector: UnratedItems,
}

impl TopN {
    /// Wrap `predictor`. It must declare the `Predictor` capability for
    /// scoring to work; this is checked when scores are requested.
    pub fn new(predictor: Box<dyn Algorithm>) -> Self {
        TopN {
            predictor,
            selector: UnratedItems::new(),
        }
    }

    pub fn predictor(&self) -> &dyn Algorithm {
        self.predictor.as_ref()
    }

    pub fn selector(&self) -> &UnratedItems {
        &self.selector
    }

    fn scorer(&self) -> Result<&dyn Predictor> {
        self.predictor
            .as_predictor()
            .ok_or(AlgorithmError::Unimplemented {
                operation: "predict_for_user",
            })
    }
}

impl Parameterized for TopN {
    fn name(&self) -> &str {
        "TopN"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["predictor", "selector"]
    }

    fn param(&self, name: &str) -> Option<Param<'_>> {
        match name {
            "predictor" => Some(Param::Nested(self.predictor.as_parameterized())),
            "selector" => Some(Param::value("unrated")),
            _ => None,
        }
    }
}

impl Algorithm for TopN {
    fn fit(&mut self, data: &TrainingData<'_>) -> Result<()> {
        self.predictor.fit(data)?;
        self.selector.fit(data.ratings);
        log::debug!(
            "fitted TopN over {} with {} candidate items",
            self.predictor.name(),
            self.selector.n_items()
        );
        Ok(())
    }

    fn state(&self) -> Result<AlgorithmState> {
        let state = TopNState {
            predictor: self.predictor.state()?,
            selector: self.selector.clone(),
        };
        AlgorithmState::capture(self.name(), &state)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        let state: TopNState = state.decode(self.name())?;
        self.predictor.restore(state.predictor)?;
        self.selector = state.selector;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        Some(self)
    }

    fn into_recommender(self: Box<Self>) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Ok(self)
    }
}

impl Predictor for TopN {
    fn predict_for_user(
        &self,
        user: UserId,
        items: &[ItemId],
        ratings: Option<&UserRatings>,
    ) -> Result<ItemScores> {
        self.scorer()?.predict_for_user(user, items, ratings)
    }
}

impl Recommender for TopN {
    fn recommend(
        &self,
        user: UserId,
        n: Option<usize>,
        candidates: Option<&[ItemId]>,
        ratings: Option<&UserRatings>,
    ) -> Result<Vec<ScoredItem>> {
        let scorer = self.scorer()?;
        let candidates = match candidates {
            Some(items) => {
                let mut seen = HashSet::new();
                items.iter().copied().filter(|i| seen.insert(*i)).collect()
            }
            None => self.selector.candidates(user, ratings),
        };

        let scores = scorer.predict_for_user(user, &candidates, ratings)?;
        let mut ranked: Vec<ScoredItem> = candidates
            .iter()
            .filter_map(|item| match scores.get(item) {
                Some(Some(score)) if !score.is_nan() => Some(ScoredItem::new(*item, *score)),
                _ => None,
            })
            .collect();

        // descending score, ascending item id on ties
        ranked.sort_by(|a, b| {
            let (sa, sb) = (a.score.unwrap_or(f64::NAN), b.score.unwrap_or(f64::NAN));
            sb.total_cmp(&sa).then(a.item.cmp(&b.item))
        });
        if let Some(n) = n {
            ranked.truncate(n);
        }

        log::trace!(
            "TopN: {} of {} candidates ranked for user {}",
            ranked.len(),
            candidates.len(),
            user
        );
        Ok(ranked)
    }
}
