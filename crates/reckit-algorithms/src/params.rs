//! Parameter introspection for algorithms.
//!
//! Every algorithm declares the names of its constructor parameters and
//! exposes each one either as a plain `ParamValue` or as a nested
//! parameterized component. `Parameterized::get_params` turns that
//! declaration into a flat `ParamSet`, prefixing nested entries with
//! `parent__`.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between a parent parameter name and a nested one.
pub const NESTED_SEPARATOR: &str = "__";

/// Parameter name to value, in declaration order.
pub type ParamSet = IndexMap<String, ParamValue>;

/// The value of a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
    /// A nested algorithm, described by its name and shallow parameters.
    Algorithm { name: String, params: ParamSet },
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::None, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// What an algorithm exposes under one declared parameter name.
pub enum Param<'a> {
    Value(ParamValue),
    Nested(&'a dyn Parameterized),
}

impl<'a> Param<'a> {
    pub fn value(v: impl Into<ParamValue>) -> Self {
        Param::Value(v.into())
    }
}

/// A component whose configuration can be inspected by parameter name.
pub trait Parameterized {
    /// Stable name labelling nested parameters and persisted state.
    ///
    /// Generic types should fold their type arguments into the name so that
    /// different instantiations do not share a state tag.
    fn name(&self) -> &str;

    /// The constructor parameter names this type declares.
    fn param_names(&self) -> &'static [&'static str];

    /// Current value of a declared parameter, or `None` if the instance
    /// does not expose it.
    fn param(&self, name: &str) -> Option<Param<'_>>;

    /// Collect the declared parameters into a `ParamSet`.
    ///
    /// With `deep`, nested components contribute their own (deep) parameters
    /// under `parent__child` keys. A flattened key never replaces a
    /// top-level one, and among flattened keys the first declared wins.
    fn get_params(&self, deep: bool) -> ParamSet {
        let mut params = ParamSet::new();
        let mut flattened = Vec::new();

        for &name in self.param_names() {
            match self.param(name) {
                Some(Param::Value(value)) => {
                    params.insert(name.to_string(), value);
                }
                Some(Param::Nested(child)) => {
                    params.insert(
                        name.to_string(),
                        ParamValue::Algorithm {
                            name: child.name().to_string(),
                            params: child.get_params(false),
                        },
                    );
                    if deep {
                        for (key, value) in child.get_params(true) {
                            flattened.push((format!("{}{}{}", name, NESTED_SEPARATOR, key), value));
                        }
                    }
                }
                None => {}
            }
        }

        for (key, kind) in merge_flattened(&mut params, flattened) {
            match kind {
                Collision::TopLevel => log::warn!(
                    "{}: nested parameter '{}' collides with a top-level parameter, keeping the top-level value",
                    self.name(),
                    key
                ),
                Collision::Nested => log::warn!(
                    "{}: nested parameter '{}' is produced by more than one component, keeping the first one",
                    self.name(),
                    key
                ),
            }
        }

        params
    }
}

/// What a flattened key ran into when merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collision {
    TopLevel,
    Nested,
}

/// Append `flattened` entries to `params`, skipping keys already present.
/// Returns the skipped keys in order, with what they collided with.
pub(crate) fn merge_flattened(
    params: &mut ParamSet,
    flattened: Vec<(String, ParamValue)>,
) -> Vec<(String, Collision)> {
    let top_level = params.len();
    let mut collisions = Vec::new();
    for (key, value) in flattened {
        match params.get_index_of(&key) {
            Some(index) if index < top_level => collisions.push((key, Collision::TopLevel)),
            Some(_) => collisions.push((key, Collision::Nested)),
            None => {
                params.insert(key, value);
            }
        }
    }
    collisions
}
