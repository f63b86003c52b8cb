use serde::{Deserialize, Serialize};

/// Pharmacologic condition under which a recording was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Rest,
    Adenosine,
    Dobutamine,
}

impl Condition {
    /// Suffix used by the report columns (`iFR_mean_<suffix>`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Condition::Rest => "rest",
            Condition::Adenosine => "ado",
            Condition::Dobutamine => "dobu",
        }
    }

    /// Capitalised suffix, used in plot titles.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Rest => "Rest",
            Condition::Adenosine => "Ado",
            Condition::Dobutamine => "Dobu",
        }
    }
}

/// Substring rule mapping a recording identifier to its [`Condition`].
///
/// The rest marker is checked first, then the adenosine marker; anything else
/// is dobutamine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRule {
    pub rest_marker: String,
    pub adenosine_marker: String,
}

impl Default for ConditionRule {
    fn default() -> Self {
        Self {
            rest_marker: "rest".into(),
            adenosine_marker: "ade".into(),
        }
    }
}

impl ConditionRule {
    pub fn classify(&self, id: &str) -> Condition {
        if id.contains(&self.rest_marker) {
            Condition::Rest
        } else if id.contains(&self.adenosine_marker) {
            Condition::Adenosine
        } else {
            Condition::Dobutamine
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_substring_in_priority_order() {
        let rule = ConditionRule::default();
        assert_eq!(rule.classify("P01_rest"), Condition::Rest);
        assert_eq!(rule.classify("P01_adenosine"), Condition::Adenosine);
        assert_eq!(rule.classify("P01_dobutamine"), Condition::Dobutamine);
        // "ado" alone does not carry the adenosine marker
        assert_eq!(rule.classify("P01_ado"), Condition::Dobutamine);
        assert_eq!(rule.classify("rest_ade"), Condition::Rest);
    }

    #[test]
    fn custom_markers_are_respected() {
        let rule = ConditionRule {
            rest_marker: "baseline".into(),
            adenosine_marker: "ado".into(),
        };
        assert_eq!(rule.classify("P07_baseline"), Condition::Rest);
        assert_eq!(rule.classify("P07_ado"), Condition::Adenosine);
        assert_eq!(rule.classify("P07_rest"), Condition::Dobutamine);
        assert_eq!(Condition::Adenosine.suffix(), "ado");
        assert_eq!(Condition::Dobutamine.label(), "Dobu");
    }
}
