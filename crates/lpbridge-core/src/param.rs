//! Closed parameter vocabulary and typed parameter storage.
//!
//! Each [`Param`] key declares the value kind it accepts. Adapters translate
//! keys into backend-native option calls; a backend with no native
//! counterpart for a key rejects it with `UnknownParameter` instead of
//! emulating it.

use crate::error::LpError;
use crate::types::Sense;
use std::collections::BTreeMap;

/// Tunable solver parameters, uniform across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// How many threads the backend may use.
    Threads,
    /// Output verbosity level; 0 is quiet.
    Verbosity,
    /// Wall-clock time limit for a solve, in seconds.
    TimeLimit,
    /// Maximum number of iterations of the backend's main algorithm.
    IterationLimit,
    /// Feasibility tolerance. Backends differ in how they interpret this
    /// (HiGHS applies it to primal and dual feasibility absolutely,
    /// Clarabel to its residual checks); the uniform meaning is "accept a
    /// point as feasible when violations are at most this large".
    FeasibilityTolerance,
    /// Seed for backend-internal randomized decisions.
    RandomSeed,
}

impl Param {
    /// The value kind this parameter requires.
    pub fn kind(self) -> ParamKind {
        match self {
            Param::Threads => ParamKind::Int,
            Param::Verbosity => ParamKind::Int,
            Param::TimeLimit => ParamKind::Float,
            Param::IterationLimit => ParamKind::Int,
            Param::FeasibilityTolerance => ParamKind::Float,
            Param::RandomSeed => ParamKind::Int,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Param::Threads => "threads",
            Param::Verbosity => "verbosity",
            Param::TimeLimit => "time_limit",
            Param::IterationLimit => "iteration_limit",
            Param::FeasibilityTolerance => "feasibility_tolerance",
            Param::RandomSeed => "random_seed",
        }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parameter value, either integer or floating-point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i32),
    Float(f64),
}

impl ParamValue {
    pub fn kind(self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
        }
    }
}

/// The set of parameters applied to a solver.
///
/// `set` validates the value kind against the key's declared kind before
/// storing anything, so a rejected call leaves the set unchanged.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    values: BTreeMap<Param, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a parameter value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameterType` when the value kind does not match
    /// the kind declared by `param`; previously applied parameters are
    /// unaffected.
    pub fn set(&mut self, param: Param, value: ParamValue) -> Result<(), LpError> {
        if value.kind() != param.kind() {
            return Err(LpError::InvalidParameterType {
                param,
                expected: param.kind(),
                got: value.kind(),
            });
        }
        self.values.insert(param, value);
        Ok(())
    }

    pub fn get(&self, param: Param) -> Option<ParamValue> {
        self.values.get(&param).copied()
    }

    /// Get an integer-kind parameter, if applied.
    pub fn int(&self, param: Param) -> Option<i32> {
        match self.get(param) {
            Some(ParamValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    /// Get a float-kind parameter, if applied.
    pub fn float(&self, param: Param) -> Option<f64> {
        match self.get(param) {
            Some(ParamValue::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Param, ParamValue)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }
}

/// Helper for adapters that map the Verbosity level onto a native on/off
/// switch: anything above zero is verbose.
pub fn verbosity_enables_output(params: &ParamSet) -> bool {
    params.int(Param::Verbosity).unwrap_or(0) > 0
}

/// Render a sense for structured log fields.
pub fn sense_str(sense: Sense) -> &'static str {
    match sense {
        Sense::Minimize => "minimize",
        Sense::Maximize => "maximize",
    }
}
