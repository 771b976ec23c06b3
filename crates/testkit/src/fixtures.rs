//! Connection-string fixtures stored under `crates/testkit/fixtures`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

/// Errors raised while loading fixtures.
#[derive(Debug)]
pub enum FixtureError {
    /// Fixture file does not exist.
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture manifest could not be parsed.
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFixture { path } => {
                write!(formatter, "missing fixture: {}", path.display())
            },
            Self::FixtureRead { path, source } => {
                write!(
                    formatter,
                    "failed to read fixture {}: {}",
                    path.display(),
                    source
                )
            },
            Self::FixtureParse { path, source } => {
                write!(
                    formatter,
                    "failed to parse fixture {}: {}",
                    path.display(),
                    source
                )
            },
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureRead { source, .. } => Some(source),
            Self::FixtureParse { source, .. } => Some(source),
            Self::MissingFixture { .. } => None,
        }
    }
}

/// Expected grammar failure for a malformed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedGrammarError {
    /// Key whose value was left open.
    pub key: String,
    /// Byte offset of the opening quote.
    pub position: usize,
}

/// One entry of `connection/cases.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCase {
    /// Case name.
    pub name: String,
    /// Input file, relative to `fixtures/connection`.
    pub input: String,
    /// Expected canonical serialization file, if the input parses.
    #[serde(default)]
    pub canonical: Option<String>,
    /// Expected authentication type member name.
    #[serde(default)]
    pub authentication_type: Option<String>,
    /// Expected normalized service URI.
    #[serde(default)]
    pub service_uri: Option<String>,
    /// Expected discovery endpoint.
    #[serde(default)]
    pub discovery_uri: Option<String>,
    /// Expected unknown-options residue.
    #[serde(default)]
    pub unknown_options: String,
    /// Expected grammar failure.
    #[serde(default)]
    pub error: Option<ExpectedGrammarError>,
}

impl ConnectionCase {
    /// Read the input text.
    pub fn input_text(&self) -> Result<String, FixtureError> {
        read_connection_text(&self.input)
    }

    /// Read the expected canonical text, if any.
    pub fn canonical_text(&self) -> Result<Option<String>, FixtureError> {
        self.canonical
            .as_deref()
            .map(read_connection_text)
            .transpose()
    }
}

/// Load every connection case from the manifest.
pub fn connection_cases() -> Result<Vec<ConnectionCase>, FixtureError> {
    let path = connection_dir().join("cases.json");
    let contents = read(&path)?;
    serde_json::from_str(&contents).map_err(|error| FixtureError::FixtureParse {
        path,
        source: error,
    })
}

/// Read a connection-string fixture without its trailing line break.
pub fn read_connection_text(file_name: &str) -> Result<String, FixtureError> {
    let contents = read(&connection_dir().join(file_name))?;
    Ok(contents.trim_end_matches(['\r', '\n']).to_owned())
}

/// Root of the fixture tree.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn connection_dir() -> PathBuf {
    fixture_root().join("connection")
}

fn read(path: &Path) -> Result<String, FixtureError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(FixtureError::MissingFixture {
                path: path.to_path_buf(),
            })
        },
        Err(error) => Err(FixtureError::FixtureRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_point_at_existing_files() -> Result<(), FixtureError> {
        let cases = connection_cases()?;
        assert!(!cases.is_empty());
        for case in &cases {
            let input = case.input_text()?;
            assert!(!input.is_empty(), "{} has an empty input", case.name);
            assert!(!input.ends_with('\n'));
            case.canonical_text()?;
        }
        Ok(())
    }

    #[test]
    fn missing_files_are_reported_by_path() {
        let error = read_connection_text("does-not-exist.txt");
        assert!(matches!(error, Err(FixtureError::MissingFixture { .. })));
    }
}
