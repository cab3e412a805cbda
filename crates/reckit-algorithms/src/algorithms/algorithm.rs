use std::path::Path;

use crate::algorithms::predictor::Predictor;
use crate::algorithms::recommender::Recommender;
use crate::data::TrainingData;
use crate::error::Result;
use crate::params::Parameterized;
use crate::persist::{self, AlgorithmState};

/// Conversions every sized algorithm gets for free, so that capability
/// queries work through `Box<dyn Algorithm>`.
pub trait AlgorithmObject {
    fn as_parameterized(&self) -> &dyn Parameterized;
    fn into_algorithm(self: Box<Self>) -> Box<dyn Algorithm>;
}

impl<T: Algorithm + 'static> AlgorithmObject for T {
    fn as_parameterized(&self) -> &dyn Parameterized {
        self
    }

    fn into_algorithm(self: Box<Self>) -> Box<dyn Algorithm> {
        self
    }
}

/// Base capability shared by every trainable algorithm.
///
/// Capability queries have no defaults: each implementor states whether it
/// is a `Predictor` (`as_predictor`) and whether it is a `Recommender`
/// (`into_recommender`), so a forgotten declaration is a compile error.
pub trait Algorithm: Parameterized + AlgorithmObject + Send + Sync {
    /// Train on `data`, replacing any previously fitted state.
    fn fit(&mut self, data: &TrainingData<'_>) -> Result<()>;

    /// The declared fitted and parameter state of this instance.
    fn state(&self) -> Result<AlgorithmState>;

    /// Replace this instance's state with `state`.
    ///
    /// Implementations must reject a state captured from another algorithm
    /// without modifying `self`.
    fn restore(&mut self, state: AlgorithmState) -> Result<()>;

    fn save(&self, path: &Path) -> Result<()> {
        persist::save_state(&self.state()?, path)
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let state = persist::load_state(path)?;
        self.restore(state)
    }

    /// Fit and hand back the instance, for fluent construction.
    fn fitted(mut self, data: &TrainingData<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        self.fit(data)?;
        Ok(self)
    }

    /// `Some(self)` for predictors, `None` otherwise.
    fn as_predictor(&self) -> Option<&dyn Predictor>;

    /// `Ok(self)` for recommenders; anything else gives itself back as `Err(self)`.
    fn into_recommender(self: Box<Self>) -> std::result::Result<Box<dyn Recommender>, Box<dyn Algorithm>>;
}
