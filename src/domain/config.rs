use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::SortOption;

/// Configuration for the review browser.
///
/// Read once at start-up. Nothing is ever written back implicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Sort mode applied when none is requested.
    default_sort: SortOption,

    /// Names of the columns shown in table output.
    ///
    /// If this is empty, a built-in selection is used.
    columns: Vec<String>,

    /// A fixed date stamped on new reviews that don't carry their own.
    ///
    /// When unset, the current UTC date is used.
    today: Option<NaiveDate>,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the default sort mode.
    #[must_use]
    pub const fn default_sort(&self) -> SortOption {
        self.default_sort
    }

    /// Returns the configured table columns, if any.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the fixed date for new reviews, if configured.
    #[must_use]
    pub const fn today(&self) -> Option<NaiveDate> {
        self.today
    }
}

/// On-disk forms of [`Config`], tagged by `_version`.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        default_sort: SortOption,

        #[serde(default)]
        columns: Vec<String>,

        #[serde(default)]
        today: Option<NaiveDate>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_sort,
                columns,
                today,
            } => Self {
                default_sort,
                columns,
                today,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
_version = "1"
default_sort = "highest"
columns = ["id", "rating"]
today = "2025-04-01"
"#,
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.default_sort(), SortOption::Highest);
        assert_eq!(config.columns(), &["id".to_string(), "rating".to_string()]);
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2025, 4, 1));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndefault_sort = \"random\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let config: Config = toml::from_str(
            r#"
_version = "1"
today = "2025-01-02"
"#,
        )
        .unwrap();

        assert_eq!(config.default_sort(), SortOption::Newest);
        assert!(config.columns().is_empty());
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result = toml::from_str::<Config>("_version = \"2\"\n");
        assert!(result.is_err());
    }
}
