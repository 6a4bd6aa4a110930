// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A judgment recorded in a comparison matrix.
///
/// Symbolic judgments are kept as entered and only turned into ratios when
/// priorities are computed (see [`ScaleRules::resolve`]). Each variant also has
/// a signed numeric code, which is the compact form used when exchanging
/// matrices with other tools.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Judgment {
    /// No judgment offered for this pair (code `0`).
    Missing,
    /// Both alternatives are equally important (code `1`).
    Equal,
    /// The row alternative is moderately better (code `-1`).
    Better,
    /// The row alternative is strongly better (code `-2`).
    MuchBetter,
    /// The row alternative is moderately worse (code `-3`).
    Worse,
    /// The row alternative is strongly worse (code `-4`).
    MuchWorse,
    /// A direct numeric ratio, for example `7.0` for "seven times as important".
    ///
    /// Ratios are expected to be positive. Negative ratios are accepted but the
    /// priorities computed from them are meaningless.
    Ratio(f64),
}

impl Judgment {
    /// The signed code of this judgment.
    pub fn code(&self) -> f64 {
        match self {
            Judgment::Missing => 0.0,
            Judgment::Equal => 1.0,
            Judgment::Better => -1.0,
            Judgment::MuchBetter => -2.0,
            Judgment::Worse => -3.0,
            Judgment::MuchWorse => -4.0,
            Judgment::Ratio(r) => *r,
        }
    }

    /// Reads back a signed code. Values that are not codes are ratios.
    pub fn from_code(code: f64) -> Judgment {
        if code == 0.0 {
            Judgment::Missing
        } else if code == 1.0 {
            Judgment::Equal
        } else if code == -1.0 {
            Judgment::Better
        } else if code == -2.0 {
            Judgment::MuchBetter
        } else if code == -3.0 {
            Judgment::Worse
        } else if code == -4.0 {
            Judgment::MuchWorse
        } else {
            Judgment::Ratio(code)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Judgment::Missing) || matches!(self, Judgment::Ratio(r) if *r == 0.0)
    }
}

/// The subgroups of users, by group attribute.
///
/// For example, the attribute `Gender` may have the values `M` and `F`, each
/// value holding the users that belong to it. Attributes, values and members
/// are kept in insertion order.
///
/// Members do not need to be registered users of a model: the users without
/// judgments are skipped when a group is aggregated.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct GroupTable {
    pub(crate) attributes: Vec<GroupAttribute>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct GroupAttribute {
    pub name: String,
    pub subgroups: Vec<Subgroup>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Subgroup {
    pub value: String,
    pub members: Vec<String>,
}

impl GroupTable {
    pub fn new() -> GroupTable {
        GroupTable::default()
    }

    /// Declares an attribute, even if no user has a value for it yet.
    pub fn add_attribute(&mut self, attribute: &str) {
        self.attribute_mut(attribute);
    }

    /// Puts a user in the subgroup `value` of `attribute`, creating both if needed.
    pub fn add_member(&mut self, attribute: &str, value: &str, user: &str) {
        let attr = self.attribute_mut(attribute);
        let position = attr.subgroups.iter().position(|sg| sg.value == value);
        let idx = match position {
            Some(idx) => idx,
            None => {
                attr.subgroups.push(Subgroup {
                    value: value.to_string(),
                    members: Vec::new(),
                });
                attr.subgroups.len() - 1
            }
        };
        attr.subgroups[idx].members.push(user.to_string());
    }

    pub fn attributes(&self) -> &[GroupAttribute] {
        &self.attributes
    }

    /// The members of a subgroup, if it exists.
    pub fn members(&self, attribute: &str, value: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|a| a.name == attribute)
            .and_then(|a| a.subgroups.iter().find(|sg| sg.value == value))
            .map(|sg| sg.members.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn attribute_mut(&mut self, attribute: &str) -> &mut GroupAttribute {
        let position = self.attributes.iter().position(|a| a.name == attribute);
        let idx = match position {
            Some(idx) => idx,
            None => {
                self.attributes.push(GroupAttribute {
                    name: attribute.to_string(),
                    subgroups: Vec::new(),
                });
                self.attributes.len() - 1
            }
        };
        &mut self.attributes[idx]
    }
}

// ******** Output data structures *********

/// The priorities of one subgroup.
#[derive(PartialEq, Debug, Clone)]
pub struct SubgroupScores {
    pub value: String,
    pub priorities: Vec<f64>,
}

/// The priorities of all the subgroups of one group attribute.
#[derive(PartialEq, Debug, Clone)]
pub struct GroupScores {
    pub attribute: String,
    pub subgroups: Vec<SubgroupScores>,
}

/// A full snapshot of the computations of a model.
///
/// All the priority vectors are aligned with `alternatives` and have their
/// largest component equal to 1.
#[derive(PartialEq, Debug, Clone)]
pub struct AllCalcs {
    pub alternatives: Vec<String>,
    pub users: Vec<String>,
    pub user_scores: Vec<(String, Vec<f64>)>,
    pub groups: GroupTable,
    pub group_scores: Vec<GroupScores>,
}

/// Errors that prevent building a model or computing its priorities.
#[derive(PartialEq, Debug, Clone)]
pub enum ModelError {
    DuplicateAlternative(String),
    DuplicateUser(String),
    UnknownAlternative(String),
    UnknownUser(String),
    /// The matrix handed to the extractor or the aggregator has the wrong shape.
    ShapeError {
        rows: usize,
        cols: usize,
    },
    /// The power iteration did not settle.
    ConvergenceFailure {
        iterations: u32,
        last_delta: f64,
    },
}

impl Error for ModelError {}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateAlternative(alt) => {
                write!(f, "alternative {:?} already exists", alt)
            }
            ModelError::DuplicateUser(user) => write!(f, "user {:?} already exists", user),
            ModelError::UnknownAlternative(alt) => write!(f, "unknown alternative {:?}", alt),
            ModelError::UnknownUser(user) => write!(f, "unknown user {:?}", user),
            ModelError::ShapeError { rows, cols } => {
                write!(f, "expected a square matrix, got {}x{}", rows, cols)
            }
            ModelError::ConvergenceFailure {
                iterations,
                last_delta,
            } => write!(
                f,
                "no convergence after {} iterations (last change: {})",
                iterations, last_delta
            ),
        }
    }
}

// ********* Configuration **********

/// The intensity scale and the settings of the eigenvector solver.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScaleRules {
    /// The ratio of a moderate preference (`>` or `<`).
    pub moderate: f64,
    /// The ratio of a strong preference (`>>` or `<<`).
    pub strong: f64,
    /// The power iteration stops when no component moves by more than this.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl ScaleRules {
    pub const DEFAULT_RULES: ScaleRules = ScaleRules {
        moderate: 3.0,
        strong: 9.0,
        tolerance: 1e-8,
        max_iterations: 10000,
    };
}

impl Default for ScaleRules {
    fn default() -> Self {
        ScaleRules::DEFAULT_RULES
    }
}
