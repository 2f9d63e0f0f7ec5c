use serde::{Deserialize, Serialize};

/// Option flags selecting which rewrite rules run
///
/// The flags are independent and any subset may be active. The struct is `Copy`,
/// so each transformation works on a snapshot taken when it is invoked.
///
/// On the wire the flags are `simplify`, `soften` and `caseSupport`. Missing flags
/// deserialize as `false`; unknown flag names are rejected rather than ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FeedbackOptions {
    /// Replace wordy verbs with plainer ones
    pub simplify: bool,
    /// Lead the feedback in with a gentler suggestion
    pub soften: bool,
    /// Ask for a concrete example backing the point
    pub case_support: bool,
}

impl FeedbackOptions {
    /// All flags off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simplify(mut self, enabled: bool) -> Self {
        self.simplify = enabled;
        self
    }

    pub fn with_soften(mut self, enabled: bool) -> Self {
        self.soften = enabled;
        self
    }

    pub fn with_case_support(mut self, enabled: bool) -> Self {
        self.case_support = enabled;
        self
    }

    /// True when no flag is set
    pub fn is_empty(&self) -> bool {
        !(self.simplify || self.soften || self.case_support)
    }

    /// Human-readable labels of the active flags, in rule order
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.simplify, "Simplify"),
            (self.soften, "Soften"),
            (self.case_support, "Case Support"),
        ]
        .into_iter()
        .filter_map(|(active, label)| active.then_some(label))
        .collect()
    }

    /// Summary for listings: `"Simplify, Soften"`, or `"None"` when nothing is set
    pub fn describe(&self) -> String {
        let labels = self.labels();
        if labels.is_empty() {
            "None".to_string()
        } else {
            labels.join(", ")
        }
    }
}
