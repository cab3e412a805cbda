//! Small algorithms used by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use reckit_algorithms::algorithms::{Algorithm, Predictor, Recommender};
use reckit_algorithms::persist::AlgorithmState;
use reckit_algorithms::{
    AlgorithmError, ItemId, ItemScores, Param, Parameterized, RatingTable, Result, ScoredItem,
    TrainingData, UserId, UserRatings,
};
use serde::{Deserialize, Serialize};

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .parse_env(env_logger::Env::default().filter_or("RECKIT_LOG", "warn"))
        .try_init();
}

pub fn small_ratings() -> RatingTable {
    RatingTable::from_triples(&[
        (1, 10, 4.0),
        (1, 20, 2.0),
        (2, 10, 5.0),
        (2, 30, 3.0),
        (3, 20, 4.0),
        (3, 30, 1.0),
        (3, 40, 5.0),
    ])
}

/// Damped per-item mean rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMean {
    pub damping: f64,
    pub means: HashMap<ItemId, f64>,
}

impl ItemMean {
    pub fn new(damping: f64) -> Self {
        ItemMean {
            damping,
            means: HashMap::new(),
        }
    }
}

impl Parameterized for ItemMean {
    fn name(&self) -> &str {
        "ItemMean"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["damping"]
    }

    fn param(&self, name: &str) -> Option<Param<'_>> {
        match name {
            "damping" => Some(Param::value(self.damping)),
            _ => None,
        }
    }
}

impl Algorithm for ItemMean {
    fn fit(&mut self, data: &TrainingData<'_>) -> Result<()> {
        let mut sums: HashMap<ItemId, (f64, f64)> = HashMap::new();
        for r in data.ratings {
            let entry = sums.entry(r.item).or_insert((0.0, 0.0));
            entry.0 += r.rating.unwrap_or(1.0);
            entry.1 += 1.0;
        }
        self.means = sums
            .into_iter()
            .map(|(item, (sum, n))| (item, sum / (n + self.damping)))
            .collect();
        Ok(())
    }

    fn state(&self) -> Result<AlgorithmState> {
        AlgorithmState::capture(self.name(), self)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        let restored: ItemMean = state.decode(self.name())?;
        *self = restored;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        Some(self)
    }

    fn into_recommender(
        self: Box<Self>,
    ) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Err(self)
    }
}

impl Predictor for ItemMean {
    fn predict_for_user(
        &self,
        _user: UserId,
        items: &[ItemId],
        _ratings: Option<&UserRatings>,
    ) -> Result<ItemScores> {
        Ok(items
            .iter()
            .map(|item| (*item, self.means.get(item).copied()))
            .collect())
    }
}

/// Shrinks a base predictor's scores toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shrunk {
    pub shrinkage: f64,
    pub base: ItemMean,
}

impl Shrunk {
    pub fn new(shrinkage: f64, base: ItemMean) -> Self {
        Shrunk { shrinkage, base }
    }
}

impl Parameterized for Shrunk {
    fn name(&self) -> &str {
        "Shrunk"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["shrinkage", "base"]
    }

    fn param(&self, name: &str) -> Option<Param<'_>> {
        match name {
            "shrinkage" => Some(Param::value(self.shrinkage)),
            "base" => Some(Param::Nested(&self.base)),
            _ => None,
        }
    }
}

impl Algorithm for Shrunk {
    fn fit(&mut self, data: &TrainingData<'_>) -> Result<()> {
        self.base.fit(data)
    }

    fn state(&self) -> Result<AlgorithmState> {
        AlgorithmState::capture(self.name(), self)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        let restored: Shrunk = state.decode(self.name())?;
        *self = restored;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        Some(self)
    }

    fn into_recommender(
        self: Box<Self>,
    ) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Err(self)
    }
}

impl Predictor for Shrunk {
    fn predict_for_user(
        &self,
        user: UserId,
        items: &[ItemId],
        ratings: Option<&UserRatings>,
    ) -> Result<ItemScores> {
        let mut scores = self.base.predict_for_user(user, items, ratings)?;
        for score in scores.values_mut() {
            *score = score.map(|s| s * (1.0 - self.shrinkage));
        }
        Ok(scores)
    }
}

/// Returns canned scores and records the order of its per-user calls.
/// Requested items missing from the table are left out of the result.
#[derive(Debug, Default)]
pub struct Scripted {
    pub scores: HashMap<UserId, HashMap<ItemId, Option<f64>>>,
    pub calls: Mutex<Vec<(UserId, Vec<ItemId>)>>,
    pub fail_for: Option<UserId>,
}

impl Scripted {
    pub fn new(entries: &[(UserId, ItemId, Option<f64>)]) -> Self {
        let mut scores: HashMap<UserId, HashMap<ItemId, Option<f64>>> = HashMap::new();
        for &(user, item, score) in entries {
            scores.entry(user).or_default().insert(item, score);
        }
        Scripted {
            scores,
            ..Scripted::default()
        }
    }

    pub fn failing_for(mut self, user: UserId) -> Self {
        self.fail_for = Some(user);
        self
    }

    pub fn calls(&self) -> Vec<(UserId, Vec<ItemId>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Parameterized for Scripted {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn param(&self, _name: &str) -> Option<Param<'_>> {
        None
    }
}

impl Algorithm for Scripted {
    fn fit(&mut self, _data: &TrainingData<'_>) -> Result<()> {
        Ok(())
    }

    fn state(&self) -> Result<AlgorithmState> {
        AlgorithmState::capture(self.name(), &self.scores)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        self.scores = state.decode(self.name())?;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        Some(self)
    }

    fn into_recommender(
        self: Box<Self>,
    ) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Err(self)
    }
}

impl Predictor for Scripted {
    fn predict_for_user(
        &self,
        user: UserId,
        items: &[ItemId],
        _ratings: Option<&UserRatings>,
    ) -> Result<ItemScores> {
        self.calls.lock().unwrap().push((user, items.to_vec()));
        if self.fail_for == Some(user) {
            return Err(AlgorithmError::Scoring {
                user,
                message: "scripted failure".to_string(),
            });
        }
        let known = self.scores.get(&user);
        Ok(items
            .iter()
            .filter_map(|item| known.and_then(|k| k.get(item)).map(|s| (*item, *s)))
            .collect())
    }
}

/// Recommends items by rating count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MostRated {
    pub counts: Vec<(ItemId, usize)>,
}

impl Parameterized for MostRated {
    fn name(&self) -> &str {
        "MostRated"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn param(&self, _name: &str) -> Option<Param<'_>> {
        None
    }
}

impl Algorithm for MostRated {
    fn fit(&mut self, data: &TrainingData<'_>) -> Result<()> {
        let mut counts: HashMap<ItemId, usize> = HashMap::new();
        for r in data.ratings {
            *counts.entry(r.item).or_default() += 1;
        }
        let mut counts: Vec<(ItemId, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        self.counts = counts;
        Ok(())
    }

    fn state(&self) -> Result<AlgorithmState> {
        AlgorithmState::capture(self.name(), self)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        let restored: MostRated = state.decode(self.name())?;
        *self = restored;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        None
    }

    fn into_recommender(
        self: Box<Self>,
    ) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Ok(self)
    }
}

impl Recommender for MostRated {
    fn recommend(
        &self,
        _user: UserId,
        n: Option<usize>,
        candidates: Option<&[ItemId]>,
        _ratings: Option<&UserRatings>,
    ) -> Result<Vec<ScoredItem>> {
        let recs = self
            .counts
            .iter()
            .filter(|(item, _)| candidates.map_or(true, |c| c.contains(item)))
            .map(|&(item, count)| ScoredItem::new(item, count as f64))
            .take(n.unwrap_or(usize::MAX))
            .collect();
        Ok(recs)
    }
}

/// Scores items by a fixed per-item table and ranks them itself, so it is
/// both a predictor and a recommender.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Native {
    pub scores: HashMap<ItemId, f64>,
}

impl Native {
    pub fn new(entries: &[(ItemId, f64)]) -> Self {
        Native {
            scores: entries.iter().copied().collect(),
        }
    }
}

impl Parameterized for Native {
    fn name(&self) -> &str {
        "Native"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn param(&self, _name: &str) -> Option<Param<'_>> {
        None
    }
}

impl Algorithm for Native {
    fn fit(&mut self, _data: &TrainingData<'_>) -> Result<()> {
        Ok(())
    }

    fn state(&self) -> Result<AlgorithmState> {
        AlgorithmState::capture(self.name(), self)
    }

    fn restore(&mut self, state: AlgorithmState) -> Result<()> {
        let restored: Native = state.decode(self.name())?;
        *self = restored;
        Ok(())
    }

    fn as_predictor(&self) -> Option<&dyn Predictor> {
        Some(self)
    }

    fn into_recommender(
        self: Box<Self>,
    ) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>> {
        Ok(self)
    }
}

impl Predictor for Native {
    fn predict_for_user(
        &self,
        _user: UserId,
        items: &[ItemId],
        _ratings: Option<&UserRatings>,
    ) -> Result<ItemScores> {
        Ok(items
            .iter()
            .map(|item| (*item, self.scores.get(item).copied()))
            .collect())
    }
}

impl Recommender for Native {
    fn recommend(
        &self,
        _user: UserId,
        n: Option<usize>,
        candidates: Option<&[ItemId]>,
        _ratings: Option<&UserRatings>,
    ) -> Result<Vec<ScoredItem>> {
        let mut recs: Vec<ScoredItem> = self
            .scores
            .iter()
            .filter(|(item, _)| candidates.map_or(true, |c| c.contains(item)))
            .map(|(&item, &score)| ScoredItem::new(item, score))
            .collect();
        recs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap().then(a.item.cmp(&b.item)));
        recs.truncate(n.unwrap_or(usize::MAX));
        Ok(recs)
    }
}
