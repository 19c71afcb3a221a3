use std::collections::BTreeSet;

const COMMIT_PREFIX: &str = "Update to ";
const VERSION_SEPARATOR: &str = " / ";

/// Resolved versions whose generated files changed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    versions: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a changed version. Duplicates collapse.
    pub fn record(&mut self, version: &str) {
        self.versions.insert(version.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains(version)
    }

    /// Distinct versions, descending (plain string order).
    pub fn descending(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().rev().map(String::as_str)
    }

    /// Commit message summarizing the change set.
    ///
    /// ```
    /// use dockergen_core::ChangeSet;
    ///
    /// let mut changes = ChangeSet::new();
    /// changes.record("1.39.5");
    /// changes.record("1.40.1");
    /// assert_eq!(changes.commit_message(), "Update to 1.40.1 / 1.39.5");
    /// ```
    pub fn commit_message(&self) -> String {
        let versions: Vec<&str> = self.descending().collect();
        format!("{COMMIT_PREFIX}{}", versions.join(VERSION_SEPARATOR))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }
}
