pub use crate::config::*;
use crate::PairwiseModel;

/// A builder for filling a model, one judgment at a time.
///
/// Users are registered the first time they appear, and alternatives are
/// registered as they are encountered. This is the order in which a
/// spreadsheet of judgments is read.
///
/// ```
/// pub use ahp_priorities::builder::Builder;
/// pub use ahp_priorities::{Judgment, ScaleRules};
/// # use ahp_priorities::ModelError;
///
/// let mut builder = Builder::new(&ScaleRules::DEFAULT_RULES)
///     .alternatives(&["Paris".to_string(), "Rome".to_string()])?;
///
/// builder.add_judgment("Ann", "Paris", Judgment::MuchBetter, "Rome")?;
/// builder.add_judgment("Bob", "Rome", Judgment::Ratio(2.0), "Oslo")?;
/// builder.add_group_member("City", "Lyon", "Ann");
///
/// let model = builder.build();
/// assert_eq!(model.alternatives(), &["Paris", "Rome", "Oslo"]);
/// assert_eq!(model.users(), &["Ann", "Bob"]);
///
/// # Ok::<(), ModelError>(())
/// ```
pub struct Builder {
    pub(crate) _model: PairwiseModel,
}

impl Builder {
    pub fn new(rules: &ScaleRules) -> Builder {
        Builder {
            _model: PairwiseModel::new(rules),
        }
    }

    /// Registers the alternatives up front, in this order.
    ///
    /// The names must be unique.
    pub fn alternatives(mut self, alts: &[String]) -> Result<Builder, ModelError> {
        for alt in alts.iter() {
            self._model.add_alt(alt, true)?;
        }
        Ok(self)
    }

    /// Adds the judgment of `user` on `alt1` compared to `alt2`.
    pub fn add_judgment(
        &mut self,
        user: &str,
        alt1: &str,
        judgment: Judgment,
        alt2: &str,
    ) -> Result<(), ModelError> {
        self.add_user(user)?;
        self._model.add_alt(alt1, false)?;
        self._model.add_alt(alt2, false)?;
        self._model.set_vote(user, alt1, alt2, judgment)
    }

    /// Registers a user, even if this user never expresses any judgment.
    pub fn add_user(&mut self, user: &str) -> Result<(), ModelError> {
        if self._model.users().iter().any(|u| u == user) {
            Ok(())
        } else {
            self._model.add_user(user)
        }
    }

    pub fn add_group_member(&mut self, attribute: &str, value: &str, user: &str) {
        self._model.add_group_member(attribute, value, user);
    }

    pub fn build(self) -> PairwiseModel {
        self._model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_declared_alternatives() {
        let res = Builder::new(&ScaleRules::DEFAULT_RULES)
            .alternatives(&["A".to_string(), "A".to_string()]);
        assert!(matches!(res, Err(ModelError::DuplicateAlternative(a)) if a == "A"));
    }

    #[test]
    fn judgments_register_names() {
        let mut builder = Builder::new(&ScaleRules::DEFAULT_RULES);
        builder.add_judgment("Ann", "A", Judgment::Better, "B").unwrap();
        builder.add_judgment("Ann", "B", Judgment::Worse, "C").unwrap();
        builder.add_judgment("Bob", "C", Judgment::Equal, "A").unwrap();
        builder.add_user("Cid").unwrap();
        let model = builder.build();

        assert_eq!(model.alternatives(), &["A", "B", "C"]);
        assert_eq!(model.users(), &["Ann", "Bob", "Cid"]);
        let ann = model.comparison_matrix("Ann").unwrap();
        assert_eq!(ann.get(1, 2), Some(Judgment::Worse));
        assert_eq!(ann.get(2, 1), Some(Judgment::Better));
        // The second judgment of Ann grew the matrix of Ann.
        assert_eq!(ann.get(0, 2), Some(Judgment::Missing));
        let bob = model.comparison_matrix("Bob").unwrap();
        assert_eq!(bob.get(2, 0), Some(Judgment::Equal));
        assert_eq!(bob.get(0, 2), Some(Judgment::Equal));
    }

    #[test]
    fn groups_with_priorities() {
        let mut builder = Builder::new(&ScaleRules::DEFAULT_RULES);
        builder.add_judgment("Ann", "A", Judgment::Better, "B").unwrap();
        builder.add_judgment("Bob", "A", Judgment::Worse, "B").unwrap();
        builder.add_group_member("Site", "north", "Ann");
        builder.add_group_member("Site", "north", "Bob");
        builder.add_group_member("Site", "south", "Bob");
        let calcs = builder.build().all_calcs().unwrap();

        // Opposite judgments cancel out.
        let north = &calcs.group_scores[0].subgroups[0];
        assert_eq!(north.value, "north");
        for (p, e) in north.priorities.iter().zip([1.0, 1.0]) {
            assert!((p - e).abs() < 1e-9);
        }
        let south = &calcs.group_scores[0].subgroups[1];
        for (p, e) in south.priorities.iter().zip([1.0 / 3.0, 1.0]) {
            assert!((p - e).abs() < 1e-9);
        }
    }
}
