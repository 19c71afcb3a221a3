//! Upstream release tags and per-branch version resolution.
//!
//! The tag list is fetched once per run (see `dockergen-git`) and handed to
//! every consumer, so resolution never touches the network.

/// Namespace prefix of tag refs in `git ls-remote` output.
const TAG_REF_PREFIX: &str = "refs/tags/";

/// Suffix git appends to the peeled (dereferenced) entry of an annotated tag.
const PEELED_SUFFIX: &str = "^{}";

/// Upstream tags, newest first.
///
/// Ordering comes from the remote's version sort; tags are never parsed as
/// semantic versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    /// Build from tags that are already newest-first.
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// Parse the output of `git ls-remote --sort=version:refname --tags`.
    ///
    /// Lines are `<hash>\t<ref>` in ascending version order. Only peeled
    /// entries (`refs/tags/<name>^{}`) are kept, so every annotated tag is
    /// counted once. The result is reversed to newest-first.
    ///
    /// ```
    /// use dockergen_core::TagList;
    ///
    /// let output = "aaa\trefs/tags/1.39.0\n\
    ///               bbb\trefs/tags/1.39.0^{}\n\
    ///               ccc\trefs/tags/1.39.1\n\
    ///               ddd\trefs/tags/1.39.1^{}\n";
    /// let tags = TagList::from_ls_remote(output);
    /// assert_eq!(tags.as_slice(), ["1.39.1", "1.39.0"]);
    /// ```
    pub fn from_ls_remote(output: &str) -> Self {
        let mut tags: Vec<String> = output
            .lines()
            .filter_map(|line| line.split_once('\t'))
            .filter_map(|(_, reference)| {
                reference
                    .strip_suffix(PEELED_SUFFIX)?
                    .strip_prefix(TAG_REF_PREFIX)
            })
            .map(str::to_owned)
            .collect();
        tags.reverse();
        Self { tags }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Newest tag belonging to `branch`, i.e. starting with `"{branch}."`.
    ///
    /// # Errors
    ///
    /// [`Error::VersionNotFound`](crate::Error::VersionNotFound) if no tag matches.
    pub fn latest_version(&self, branch: &str) -> crate::Result<&str> {
        let prefix = format!("{branch}.");
        let found = self
            .tags
            .iter()
            .find(|tag| tag.starts_with(&prefix))
            .map(String::as_str);

        match found {
            Some(tag) => {
                tracing::debug!(branch, tag, "resolved latest version");
                Ok(tag)
            }
            None => Err(crate::Error::VersionNotFound {
                branch: branch.to_owned(),
            }),
        }
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}
