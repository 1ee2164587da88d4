/// Note shown when a picked file has an extension other than docx/pdf.
pub const UNSUPPORTED_EXTENSION_NOTE: &str = "Only .docx or .pdf are allowed.";
/// Note shown when the server refuses an upload without saying why.
pub const DEFAULT_UPLOAD_FAILURE_NOTE: &str = "Upload failed";

/// Why a document slot ended up rejected. The `Display` text is what the
/// slot note shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Only .docx or .pdf are allowed.")]
    UnsupportedExtension { extension: String },
    #[error("Could not read {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
    #[error("Unexpected response from upload server: {0}")]
    MalformedResponse(String),
}

impl UploadError {
    pub fn rejected(status: Option<u16>, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_FAILURE_NOTE.to_string());
        UploadError::Rejected { status, message }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read session store {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session store {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write session store {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session record lock poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no grant selected")]
    NoGrantSelected,
    #[error("failed to write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
