//! Model data types shared by all backends.

use crate::ids::VariableId;

/// Optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Kind of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Continuous variable.
    Continuous,
    /// General integer variable.
    Integer,
    /// Binary variable; bounds are clamped to [0, 1].
    Binary,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Continuous => "continuous",
            VarKind::Integer => "integer",
            VarKind::Binary => "binary",
        }
    }
}

/// Relational sense of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    /// Row value must be <= rhs.
    LessEqual,
    /// Row value must be >= rhs.
    GreaterEqual,
    /// Row value must equal rhs.
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "==",
        }
    }
}

/// Bounds for a decision variable. Either side may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Unbounded on both sides.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Non-negative, unbounded above.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    /// Bounds are invalid when either side is NaN or lower exceeds upper.
    pub fn is_valid(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }
}

/// A decision variable with bounds and a kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub kind: VarKind,
}

impl Variable {
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            kind: VarKind::Continuous,
        }
    }

    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            kind: VarKind::Integer,
        }
    }

    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            kind: VarKind::Binary,
        }
    }
}

/// A linear constraint: an ordered sequence of (variable, coefficient)
/// terms, a relational sense, and a right-hand-side scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub terms: Vec<(VariableId, f64)>,
    pub sense: ComparisonSense,
    pub rhs: f64,
}

/// Linear objective: terms plus a constant offset.
///
/// Exactly one objective exists per model; setting it again replaces the
/// prior terms and constant in full. The optimization sense is stored
/// separately and is not touched by replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub terms: Vec<(VariableId, f64)>,
    pub constant: f64,
}

impl Objective {
    /// Create a new empty objective (zero function).
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            constant: 0.0,
        }
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self::new()
    }
}
