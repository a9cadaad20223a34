use std::fmt;

/// Revision substituted whenever the real one cannot be determined.
pub const UNKNOWN_REVISION: &str = "Unknown";

/// Number of revision characters appended to unreleased full versions.
pub const SHORT_HASH_LEN: usize = 7;

/// Version inputs for one build: base version, optional dev build number, release flag
///
/// Both strings are stamped as configured; they are not checked against any
/// versioning scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub base_version: String,
    pub dev_build: Option<String>,
    pub released: bool,
}

impl VersionSpec {
    /// Create a new version spec
    ///
    /// A blank build number or the literal `"None"` means "not a dev build".
    pub fn new(base_version: impl Into<String>, dev_build: Option<&str>, released: bool) -> Self {
        VersionSpec {
            base_version: base_version.into(),
            dev_build: normalize_dev_build(dev_build),
            released,
        }
    }

    /// Dev build number, if this is a dev build
    pub fn build_number(&self) -> Option<&str> {
        normalize(self.dev_build.as_deref())
    }

    /// Base version plus `.devN` when a dev build number is set
    pub fn local_version(&self) -> String {
        match self.build_number() {
            Some(build) => format!("{}.dev{}", self.base_version, build),
            None => self.base_version.clone(),
        }
    }

    /// Local version, suffixed with the short revision unless released
    pub fn full_version(&self, git_revision: &str) -> String {
        let local = self.local_version();
        if self.released {
            local
        } else {
            format!("{}-{}", local, short_revision(git_revision))
        }
    }

    /// Resolve every derived version field against a revision
    pub fn resolve(&self, git_revision: impl Into<String>) -> VersionInfo {
        let git_revision = git_revision.into();
        VersionInfo {
            short_version: self.base_version.clone(),
            build_number: self.build_number().map(str::to_string),
            version: self.local_version(),
            full_version: self.full_version(&git_revision),
            git_revision,
            release: self.released,
        }
    }
}

/// Owned form of a dev build number with `"None"` and blanks removed
pub fn normalize_dev_build(dev_build: Option<&str>) -> Option<String> {
    normalize(dev_build).map(str::to_string)
}

fn normalize(dev_build: Option<&str>) -> Option<&str> {
    dev_build
        .map(str::trim)
        .filter(|b| !b.is_empty() && *b != "None")
}

/// First seven characters of a revision, or all of it when shorter
pub fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &revision[..idx],
        None => revision,
    }
}

/// Every field written to the generated version file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub short_version: String,
    pub build_number: Option<String>,
    pub version: String,
    pub full_version: String,
    pub git_revision: String,
    pub release: bool,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_version)
    }
}
