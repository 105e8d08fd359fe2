//! Category to file-glob mapping used for Cursor rule metadata.

/// Globs applied when a category has no entry in [`CATEGORY_GLOBS`].
pub const FALLBACK_GLOBS: &[&str] = &["**/*"];

/// Static lookup from category directory name to the files its rules cover.
pub const CATEGORY_GLOBS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &["**/*.js", "**/*.jsx", "**/*.ts", "**/*.tsx", "**/*.vue", "**/*.svelte", "**/*.html"],
    ),
    (
        "backend",
        &[
            "**/*.py", "**/*.js", "**/*.ts", "**/*.java", "**/*.go", "**/*.rb", "**/*.php",
            "**/*.cs", "**/*.rs",
        ],
    ),
    ("database", &["**/*.sql", "**/*.prisma", "**/migrations/**", "**/models/**"]),
    (
        "infrastructure",
        &["**/*.tf", "**/*.yaml", "**/*.yml", "**/Dockerfile", "**/docker-compose*", "**/*.sh"],
    ),
    ("ai", &["**/*.py", "**/*.ipynb", "**/*.js", "**/*.ts"]),
    (
        "supply-chain",
        &[
            "**/package.json",
            "**/package-lock.json",
            "**/requirements*.txt",
            "**/pyproject.toml",
            "**/Cargo.toml",
            "**/go.mod",
            "**/pom.xml",
            "**/Gemfile",
        ],
    ),
    ("general", &["**/*"]),
];

/// Globs for `category`, or [`FALLBACK_GLOBS`] when it is unrecognized.
#[must_use]
pub fn globs_for(category: &str) -> &'static [&'static str] {
    CATEGORY_GLOBS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(FALLBACK_GLOBS, |&(_, globs)| globs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_category_has_its_own_globs() {
        let globs = globs_for("backend");
        assert!(globs.contains(&"**/*.py"));
        assert!(!globs.contains(&"**/*"));
    }

    #[test]
    fn unknown_category_matches_everything() {
        assert_eq!(globs_for("misc"), FALLBACK_GLOBS);
        assert_eq!(globs_for(""), &["**/*"]);
    }

    #[test]
    fn every_glob_in_table_is_valid() {
        for (_, globs) in CATEGORY_GLOBS {
            for glob in *globs {
                assert!(globset::Glob::new(glob).is_ok(), "invalid glob {glob}");
            }
        }
    }
}
