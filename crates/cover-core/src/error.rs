use thiserror::Error;

/// Machine-readable error codes surfaced alongside every [`Error`] so JSON
/// consumers can branch without string-matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BlankName,
    NoExpiration,
    NegativePrice,
    ItemNotFound,
    BadBackup,
    BackupEncodeFailed,
    StoreFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BlankName => "E2001",
            Self::NoExpiration => "E2002",
            Self::NegativePrice => "E2003",
            Self::ItemNotFound => "E2004",
            Self::BadBackup => "E3001",
            Self::BackupEncodeFailed => "E3002",
            Self::StoreFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BlankName => "Name is required",
            Self::NoExpiration => "No expiration date or duration",
            Self::NegativePrice => "Price must not be negative",
            Self::ItemNotFound => "Warranty not found",
            Self::BadBackup => "Backup file is malformed",
            Self::BackupEncodeFailed => "Backup serialization failed",
            Self::StoreFailed => "Database access failed",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::BlankName => Some("Provide a non-empty --name."),
            Self::NoExpiration => {
                Some("Supply --expires <YYYY-MM-DD> or a positive --months value.")
            }
            Self::NegativePrice => Some("Use a price of 0 or more."),
            Self::ItemNotFound => Some("Run `cvr list` to see valid ids."),
            Self::BadBackup => {
                Some("Backups are a JSON array of objects with name and purchaseDate fields.")
            }
            Self::BackupEncodeFailed => None,
            Self::StoreFailed => Some("Check the database path and file permissions."),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Every failure the core can produce.
///
/// Validation failures reject the operation before anything is written;
/// store failures abort the operation with prior data untouched. Nothing in
/// the core retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("name must not be blank")]
    BlankName,

    #[error("either an expiration date or a positive duration in months is required")]
    NoExpiration,

    #[error("price must not be negative")]
    NegativePrice,

    #[error("no warranty with id {id}")]
    NotFound { id: i64 },

    #[error("backup document is not valid: {reason}")]
    BadBackup { reason: String },

    #[error("failed to encode backup JSON")]
    BackupEncode(#[source] serde_json::Error),

    #[error("database access failed")]
    Store(#[from] rusqlite::Error),
}

impl Error {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::BlankName => ErrorCode::BlankName,
            Self::NoExpiration => ErrorCode::NoExpiration,
            Self::NegativePrice => ErrorCode::NegativePrice,
            Self::NotFound { .. } => ErrorCode::ItemNotFound,
            Self::BadBackup { .. } => ErrorCode::BadBackup,
            Self::BackupEncode(_) => ErrorCode::BackupEncodeFailed,
            Self::Store(_) => ErrorCode::StoreFailed,
        }
    }
}
