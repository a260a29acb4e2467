//! Uploading rendered diagrams to cloud storage.
//!
//! Only Google Cloud Storage is supported. There is no official GCS SDK for
//! Rust, so uploads go through the JSON upload API directly. The access token
//! comes from a credentials file (a plain bearer token) or, when no file is
//! given, from `gcloud auth print-access-token` run as a child process.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";
const PUBLIC_BASE: &str = "https://storage.googleapis.com";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the upload stage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The credentials file was missing, unreadable, or empty.
    #[error("unusable credentials: {0}")]
    Credentials(String),

    /// `gcloud auth print-access-token` could not produce a token.
    #[error("failed to obtain access token from gcloud: {0}")]
    Gcloud(String),

    /// The upload request failed at the transport level.
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The storage service rejected the upload.
    #[error("storage service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A destination for rendered diagram files.
pub trait CloudStorage {
    /// Uploads `path` as `object` into `bucket`, returning the public URL of
    /// the uploaded object.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the file cannot be read or the service
    /// rejects the upload.
    fn upload_file(&self, path: &Path, bucket: &str, object: &str)
    -> Result<String, StorageError>;
}

/// Google Cloud Storage client over the JSON upload API.
#[derive(Debug)]
pub struct GcsStorage {
    client: reqwest::blocking::Client,
    token: String,
}

impl GcsStorage {
    /// Builds a client from a credentials file containing a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Credentials`] if the file is unreadable or
    /// holds nothing but whitespace.
    pub fn from_token_file(path: &Path) -> Result<Self, StorageError> {
        let token = fs::read_to_string(path)
            .map_err(|err| StorageError::Credentials(format!("{}: {err}", path.display())))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(StorageError::Credentials(format!(
                "{} is empty",
                path.display()
            )));
        }
        Self::with_token(token)
    }

    /// Builds a client by asking the `gcloud` CLI for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Gcloud`] if the CLI is missing, fails, or
    /// prints an empty token.
    pub fn from_gcloud() -> Result<Self, StorageError> {
        info!("Obtaining access token from gcloud");
        let output = Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .map_err(|err| StorageError::Gcloud(err.to_string()))?;

        if !output.status.success() {
            return Err(StorageError::Gcloud(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(StorageError::Gcloud("gcloud printed no token".to_string()));
        }
        Self::with_token(&token)
    }

    fn with_token(token: &str) -> Result<Self, StorageError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()?;
        Ok(GcsStorage {
            client,
            token: token.to_string(),
        })
    }
}

impl CloudStorage for GcsStorage {
    fn upload_file(
        &self,
        path: &Path,
        bucket: &str,
        object: &str,
    ) -> Result<String, StorageError> {
        let body = fs::read(path)?;
        let url = format!("{UPLOAD_BASE}/b/{bucket}/o");
        info!(
            file = path.display().to_string(),
            bucket = bucket,
            object = object;
            "Uploading to Google Cloud Storage"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object)])
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "image/svg+xml")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StorageError::Status { status, body });
        }
        debug!("Upload accepted");

        Ok(format!("{PUBLIC_BASE}/{bucket}/{object}"))
    }
}
