/*!

Priorities from pairwise comparisons, following the Analytic Hierarchy Process.

Each user compares the alternatives two by two ("A is moderately better than
B", "B and C are equal", ...). The judgments of a user form a reciprocal
comparison matrix, and the priority of each alternative is read from the
dominant eigenvector of that matrix. The judgments of several users can be
merged (by geometric mean) to get the priorities of a group.

The simplest way to feed a model is the [`builder::Builder`]. The long form
documentation is in the [`manual`] module.

```
use ahp_priorities::builder::Builder;
use ahp_priorities::{Judgment, ScaleRules};

let mut builder = Builder::new(&ScaleRules::DEFAULT_RULES);
builder.add_judgment("Ann", "A", Judgment::Better, "B")?;
builder.add_judgment("Ann", "B", Judgment::Equal, "C")?;
builder.add_judgment("Ann", "A", Judgment::Better, "C")?;
let model = builder.build();

let priorities = model.user_priorities()?;
assert_eq!(priorities[0].0, "Ann");
assert!((priorities[0].1[1] - 1.0 / 3.0).abs() < 1e-9);
# Ok::<(), ahp_priorities::ModelError>(())
```
*/

pub mod aggregate;
pub mod builder;
pub mod codec;
mod config;
pub mod eigen;
pub mod manual;
mod matrix;

use log::{debug, info};
use nalgebra::DMatrix;

pub use crate::config::*;
pub use crate::matrix::ComparisonMatrix;

/// The alternatives, the users and their judgments.
///
/// A model is filled once (alternatives, users, votes, groups) and then queried.
/// Alternatives are indexed in order of registration, and every user matrix
/// always covers all the alternatives.
#[derive(PartialEq, Debug, Clone)]
pub struct PairwiseModel {
    rules: ScaleRules,
    alternatives: Vec<String>,
    users: Vec<String>,
    // Aligned with `users`
    matrices: Vec<ComparisonMatrix>,
    groups: GroupTable,
}

impl Default for PairwiseModel {
    fn default() -> Self {
        PairwiseModel::new(&ScaleRules::DEFAULT_RULES)
    }
}

impl PairwiseModel {
    pub fn new(rules: &ScaleRules) -> PairwiseModel {
        PairwiseModel {
            rules: *rules,
            alternatives: Vec::new(),
            users: Vec::new(),
            matrices: Vec::new(),
            groups: GroupTable::new(),
        }
    }

    /// Forgets all the alternatives, users, judgments and groups.
    /// The scale is kept.
    pub fn clear(&mut self) {
        self.alternatives.clear();
        self.users.clear();
        self.matrices.clear();
        self.groups = GroupTable::new();
    }

    pub fn rules(&self) -> &ScaleRules {
        &self.rules
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    pub fn set_groups(&mut self, groups: GroupTable) {
        self.groups = groups;
    }

    pub fn add_group_member(&mut self, attribute: &str, value: &str, user: &str) {
        self.groups.add_member(attribute, value, user);
    }

    /// Registers an alternative.
    ///
    /// If the alternative already exists, this is an error when `strict` is
    /// set, and nothing happens otherwise.
    pub fn add_alt(&mut self, alt: &str, strict: bool) -> Result<(), ModelError> {
        if self.alternatives.iter().any(|a| a == alt) {
            if strict {
                return Err(ModelError::DuplicateAlternative(alt.to_string()));
            }
            return Ok(());
        }
        debug!("add_alt: {:?} at index {}", alt, self.alternatives.len());
        self.alternatives.push(alt.to_string());
        for m in self.matrices.iter_mut() {
            m.grow();
        }
        Ok(())
    }

    /// Registers a user, with no judgment yet.
    pub fn add_user(&mut self, user: &str) -> Result<(), ModelError> {
        if self.users.iter().any(|u| u == user) {
            return Err(ModelError::DuplicateUser(user.to_string()));
        }
        debug!("add_user: {:?}", user);
        self.users.push(user.to_string());
        self.matrices
            .push(ComparisonMatrix::identity(self.alternatives.len()));
        Ok(())
    }

    /// Records the judgment of `user` on `alt1` compared to `alt2`.
    ///
    /// The inverse judgment of `alt2` compared to `alt1` is recorded at the
    /// same time.
    pub fn set_vote(
        &mut self,
        user: &str,
        alt1: &str,
        alt2: &str,
        vote: Judgment,
    ) -> Result<(), ModelError> {
        let row = self.alt_index(alt1)?;
        let col = self.alt_index(alt2)?;
        let user_idx = self.user_index(user)?;
        self.matrices[user_idx].set_reflexive(row, col, vote);
        Ok(())
    }

    /// The judgments of a user, as stored.
    pub fn comparison_matrix(&self, user: &str) -> Option<&ComparisonMatrix> {
        self.user_index(user).ok().map(|idx| &self.matrices[idx])
    }

    /// The ratios of the judgments of a user.
    pub fn value_matrix(&self, user: &str) -> Result<DMatrix<f64>, ModelError> {
        let idx = self.user_index(user)?;
        Ok(self.matrices[idx].resolve(&self.rules))
    }

    /// The aggregated matrix of some users.
    ///
    /// Users without judgments are skipped.
    pub fn group_value_matrix(&self, users: &[String]) -> Result<DMatrix<f64>, ModelError> {
        let matrices: Vec<DMatrix<f64>> = users
            .iter()
            .filter_map(|u| self.value_matrix(u).ok())
            .collect();
        if matrices.len() < users.len() {
            debug!(
                "group_value_matrix: {} of {} users have judgments",
                matrices.len(),
                users.len()
            );
        }
        aggregate::geometric_mean_matrix(self.alternatives.len(), &matrices)
    }

    /// The priorities of every user, in order of registration.
    pub fn user_priorities(&self) -> Result<Vec<(String, Vec<f64>)>, ModelError> {
        let mut res: Vec<(String, Vec<f64>)> = Vec::new();
        for (user, m) in self.users.iter().zip(self.matrices.iter()) {
            let priorities = eigen::largest_eigenvector(&m.resolve(&self.rules), &self.rules)?;
            debug!("user_priorities: {}: {:?}", user, priorities);
            res.push((user.clone(), priorities));
        }
        Ok(res)
    }

    /// The priorities of every subgroup of every group attribute.
    pub fn group_priorities(&self) -> Result<Vec<GroupScores>, ModelError> {
        let mut res: Vec<GroupScores> = Vec::new();
        for attr in self.groups.attributes() {
            let mut subgroups: Vec<SubgroupScores> = Vec::new();
            for sg in attr.subgroups.iter() {
                let m = self.group_value_matrix(&sg.members)?;
                let priorities = eigen::largest_eigenvector(&m, &self.rules)?;
                debug!(
                    "group_priorities: {}={}: {:?}",
                    attr.name, sg.value, priorities
                );
                subgroups.push(SubgroupScores {
                    value: sg.value.clone(),
                    priorities,
                });
            }
            res.push(GroupScores {
                attribute: attr.name.clone(),
                subgroups,
            });
        }
        Ok(res)
    }

    /// All the computations, in one snapshot.
    pub fn all_calcs(&self) -> Result<AllCalcs, ModelError> {
        info!(
            "Computing priorities for {} alternatives, {} users, {} group attributes",
            self.alternatives.len(),
            self.users.len(),
            self.groups.attributes().len()
        );
        Ok(AllCalcs {
            alternatives: self.alternatives.clone(),
            users: self.users.clone(),
            user_scores: self.user_priorities()?,
            groups: self.groups.clone(),
            group_scores: self.group_priorities()?,
        })
    }

    fn alt_index(&self, alt: &str) -> Result<usize, ModelError> {
        self.alternatives
            .iter()
            .position(|a| a == alt)
            .ok_or_else(|| ModelError::UnknownAlternative(alt.to_string()))
    }

    fn user_index(&self, user: &str) -> Result<usize, ModelError> {
        self.users
            .iter()
            .position(|u| u == user)
            .ok_or_else(|| ModelError::UnknownUser(user.to_string()))
    }
}
