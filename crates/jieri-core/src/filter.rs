//! Exclusion filters applied to festival names before numbering
//!
//! Publishers sometimes need to leave certain festivals out of the
//! calendar. A filter decides per festival name; excluded festivals never
//! reach numbering, so they do not consume a sequence number.

use std::fmt;

/// Decides whether a festival is left out of the calendar
pub trait ExclusionFilter: Send + Sync {
    /// Return `true` to drop the festival with this name
    fn excludes(&self, name: &str) -> bool;
}

impl<F> ExclusionFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn excludes(&self, name: &str) -> bool {
        self(name)
    }
}

/// Keeps every festival
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusion;

impl ExclusionFilter for NoExclusion {
    fn excludes(&self, _name: &str) -> bool {
        false
    }
}

/// Excludes names that contain every keyword of at least one group
///
/// # Example
/// ```
/// use jieri_core::filter::{ExclusionFilter, KeywordGroups};
///
/// let filter = KeywordGroups::new(vec![vec!["纪念", "逝世"]]);
/// assert!(filter.excludes("某人逝世纪念日"));
/// assert!(!filter.excludes("纪念日"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordGroups {
    groups: Vec<Vec<String>>,
}

impl KeywordGroups {
    /// Create a filter from keyword groups
    ///
    /// Empty groups are ignored; they would otherwise match every name.
    pub fn new<G, K>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let groups = groups
            .into_iter()
            .map(|group| group.into_iter().map(Into::into).collect::<Vec<String>>())
            .filter(|group| !group.is_empty())
            .collect();
        Self { groups }
    }

    /// Groups used when publishing the public calendar
    pub fn redaction_default() -> Self {
        Self::new(vec![vec!["逝", "世"], vec!["毛", "东", "泽"]])
    }

    /// Configured keyword groups
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }
}

impl ExclusionFilter for KeywordGroups {
    fn excludes(&self, name: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|keyword| name.contains(keyword.as_str())))
    }
}

impl fmt::Display for KeywordGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self.groups.iter().map(|g| g.join("+")).collect();
        write!(f, "{}", groups.join(", "))
    }
}
