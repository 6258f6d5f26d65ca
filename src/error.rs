//! Error types for Skill Scrape
//!
//! This module provides the error hierarchy using `thiserror`. Fatal errors
//! carry the section anchor and row/column position so the offending part of
//! a wiki page can be found without re-running the scrape.

use thiserror::Error;

/// The main error type for Skill Scrape operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser-related errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Page layout did not match the expected structure
    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    /// Tools header row is missing identifying data
    #[error("Malformed header: {0}")]
    MalformedHeader(#[from] MalformedHeaderError),

    /// Row extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Skill name not present in the registry
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// Skill exists but has no configured table layout
    #[error("No table layout configured for skill: {0}")]
    UnsupportedSkill(String),

    /// A failure while scraping one skill, with the skill name attached
    #[error("Skill '{skill}' failed: {source}")]
    Skill {
        /// Skill being scraped
        skill: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Failed to read the rendered document
    #[error("Failed to read page content: {0}")]
    ContentFailed(String),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP error
    #[error("HTTP error {status}: {message}")]
    HttpError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
}

/// Expected anchors or tables were missing or ambiguous
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureError {
    /// No element carries the section anchor id
    #[error("Section anchor '{section}' not found")]
    AnchorNotFound {
        /// Section anchor id
        section: String,
    },

    /// The anchor has no parent to walk siblings from
    #[error("Section anchor '{section}' is detached from the document")]
    DetachedAnchor {
        /// Section anchor id
        section: String,
    },

    /// No data table follows the anchor within its section
    #[error("No '{class}' table found in section '{section}'")]
    TableNotFound {
        /// Section anchor id
        section: String,
        /// Table class searched for
        class: String,
    },

    /// More than one data table follows the anchor within its section
    #[error("Found {count} '{class}' tables in section '{section}', expected one")]
    AmbiguousTable {
        /// Section anchor id
        section: String,
        /// Table class searched for
        class: String,
        /// Number of candidate tables
        count: usize,
    },

    /// The table has fewer rows than its fixed layout needs
    #[error("Table in section '{section}' has {found} rows, expected at least {expected}")]
    MissingRows {
        /// Section anchor id
        section: String,
        /// Minimum row count
        expected: usize,
        /// Actual row count
        found: usize,
    },
}

/// A Tools header cell lacks its identifying image
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedHeaderError {
    /// No image in the header cell
    #[error("Header cell {column} in section '{section}' (row {row}) has no image")]
    MissingImage {
        /// Section anchor id
        section: String,
        /// Header row index
        row: usize,
        /// Header cell index
        column: usize,
    },

    /// Image present but carries no label
    #[error("Header cell {column} in section '{section}' (row {row}) has an unlabeled image")]
    EmptyName {
        /// Section anchor id
        section: String,
        /// Header row index
        row: usize,
        /// Header cell index
        column: usize,
    },
}

/// Row extraction errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// Tool row carries no identity in its first cell
    #[error("Row {row} in section '{section}' has no tool identity")]
    MissingIdentity {
        /// Section anchor id
        section: String,
        /// Row index within the table
        row: usize,
    },

    /// Data cell has no header column bound to its position
    #[error("Row {row} in section '{section}' has cell {column} but only {columns} header columns")]
    UnmappedColumn {
        /// Section anchor id
        section: String,
        /// Row index within the table
        row: usize,
        /// Cell index within the row
        column: usize,
        /// Number of resolved header columns
        columns: usize,
    },

    /// Invalid selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value is empty or out of range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Config field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Config file could not be read
    #[error("Failed to load config from {path}: {reason}")]
    LoadFailed {
        /// Config file path
        path: String,
        /// Underlying failure
        reason: String,
    },
}

/// Result type alias for Skill Scrape operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// Attach the skill name to an error raised while scraping it
    pub fn in_skill<S: Into<String>>(self, skill: S) -> Self {
        match self {
            already @ Error::Skill { .. } => already,
            other => Error::Skill {
                skill: skill.into(),
                source: Box::new(other),
            },
        }
    }

    /// Whether this error (or the error it wraps) came from navigation
    pub fn is_navigation(&self) -> bool {
        match self {
            Error::Navigation(_) => true,
            Error::Skill { source, .. } => source.is_navigation(),
            _ => false,
        }
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

/// Convert reqwest errors
impl From<reqwest::Error> for NavigationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return NavigationError::NetworkError(format!("request timed out: {}", err));
        }
        match err.status() {
            Some(status) => NavigationError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            },
            None => NavigationError::NetworkError(err.to_string()),
        }
    }
}
