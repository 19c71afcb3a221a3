use std::fmt;

use serde::{Deserialize, Serialize};

const APACHE: &str = "apache";
const ALPINE_SUFFIX: &str = "-alpine";

/// Base image family a variant is built on.
///
/// Each family has exactly one template, `Dockerfile-<family>.template`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseFamily {
    Debian,
    Alpine,
}

impl BaseFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::Alpine => "alpine",
        }
    }

    /// Template file name for this family.
    pub fn template_file(self) -> String {
        format!("Dockerfile-{}.template", self.as_str())
    }
}

impl fmt::Display for BaseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build flavor such as `apache` or `fpm-alpine`.
///
/// The name doubles as the output subdirectory, so it must be a single
/// non-empty path component.
///
/// # Examples
///
/// ```
/// use dockergen_core::{BaseFamily, Variant};
///
/// let v = Variant::new("fpm-alpine").unwrap();
/// assert_eq!(v.base_family(), BaseFamily::Alpine);
/// assert_eq!(v.command(), "php-fpm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variant(String);

impl Variant {
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if name == "." || name == ".." {
            Some("must not be a relative path component")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(crate::Error::InvalidVariant { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn apache() -> Self {
        Self(APACHE.to_owned())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_apache(&self) -> bool {
        self.0 == APACHE
    }

    /// `-alpine` suffixed variants use the Alpine template; all others Debian.
    pub fn base_family(&self) -> BaseFamily {
        if self.0.ends_with(ALPINE_SUFFIX) {
            BaseFamily::Alpine
        } else {
            BaseFamily::Debian
        }
    }

    /// Container command for this variant.
    pub fn command(&self) -> &'static str {
        if self.is_apache() {
            "apache2-foreground"
        } else {
            "php-fpm"
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Variant {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Variant> for String {
    fn from(value: Variant) -> Self {
        value.0
    }
}
