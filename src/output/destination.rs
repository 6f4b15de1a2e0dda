//! Where job output lands
//!
//! A destination is parsed from a URL and wraps an `object_store` backend.
//! Cloud schemes pull credentials from the environment; anything without a
//! scheme is treated as a local directory and created when missing.

use crate::error::{Error, Result};
use bytes::Bytes;
use futures::StreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutMode, PutOptions};
use std::sync::Arc;

/// Split `bucket/rest/of/path` into the bucket and the in-bucket prefix
fn split_bucket(without_scheme: &str) -> (&str, String) {
    match without_scheme.find('/') {
        Some(idx) => (
            &without_scheme[..idx],
            without_scheme[idx + 1..].trim_end_matches('/').to_string(),
        ),
        None => (without_scheme, String::new()),
    }
}

/// Construct the store client for a cloud scheme, credentials from env
fn build_cloud_store(scheme: &str, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match scheme {
        "s3" => Arc::new(
            AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| client_error(scheme, &e))?,
        ),
        "r2" => {
            // S3-compatible; endpoint https://<account_id>.r2.cloudflarestorage.com
            let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
            Arc::new(builder.build().map_err(|e| client_error(scheme, &e))?)
        }
        "gs" => Arc::new(
            GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| client_error(scheme, &e))?,
        ),
        "az" => Arc::new(
            MicrosoftAzureBuilder::from_env()
                .with_container_name(bucket)
                .build()
                .map_err(|e| client_error(scheme, &e))?,
        ),
        other => {
            return Err(Error::config(format!(
                "Unsupported destination scheme: {other}://"
            )))
        }
    };
    Ok(store)
}

fn client_error(scheme: &str, e: &object_store::Error) -> Error {
    Error::config(format!("Cannot initialize {scheme} client: {e}"))
}

/// Storage destination for job output, parsed from a URL
///
/// All paths handed to the operations below are destination-relative; the
/// bucket and any in-bucket prefix from the parsed URL are applied
/// internally.
#[derive(Debug, Clone)]
pub struct OutputDestination {
    store: Arc<dyn ObjectStore>,
    /// In-bucket prefix from the URL, empty for local destinations
    prefix: String,
    /// URL scheme, kept for logging
    scheme: String,
}

impl OutputDestination {
    /// Parse a destination URL into a ready store
    ///
    /// Recognized forms: `s3://bucket/prefix`, `r2://bucket/prefix`
    /// (S3-compatible, endpoint via `R2_ENDPOINT_URL`), `gs://bucket/prefix`,
    /// `az://container/prefix`, and plain or `file://` local directory paths.
    pub fn parse(url: &str) -> Result<Self> {
        match url.split_once("://") {
            None => Self::local(url),
            Some(("file", path)) => Self::local(path),
            Some((scheme, rest)) if matches!(scheme, "s3" | "r2" | "gs" | "az") => {
                let (bucket, prefix) = split_bucket(rest);
                Ok(Self {
                    store: build_cloud_store(scheme, bucket)?,
                    prefix,
                    scheme: scheme.to_string(),
                })
            }
            Some((other, _)) => Err(Error::config(format!(
                "Unsupported destination scheme: {other}://"
            ))),
        }
    }

    /// Local directory destination, created when missing
    fn local(path: &str) -> Result<Self> {
        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Cannot create output directory {path}: {e}")))?;
        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Cannot open local destination {path}: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Whether output goes to cloud storage rather than local disk
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// URL scheme this destination was parsed from (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Resolve a destination-relative path against the URL prefix
    fn object_path(&self, path: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(path)
        } else {
            ObjectPath::from(format!("{}/{path}", self.prefix))
        }
    }

    /// Strip the URL prefix from a listed location, back to destination-relative
    fn relative(&self, location: &ObjectPath) -> String {
        let full = location.to_string();
        if !self.prefix.is_empty() {
            if let Some(rel) = full.strip_prefix(&format!("{}/", self.prefix)) {
                return rel.to_string();
            }
        }
        full
    }

    /// Full `scheme://path` form of a destination-relative path, for logging
    pub fn full_path(&self, path: &str) -> String {
        format!("{}://{}", self.scheme, self.object_path(path))
    }

    /// Write a full object in one call, failing if the path already exists
    ///
    /// Returns the full path for logging.
    pub async fn put_create(&self, path: &str, data: Bytes) -> Result<String> {
        let location = self.object_path(path);
        let result = self
            .store
            .put_opts(&location, data.into(), PutOptions::from(PutMode::Create))
            .await;

        match result {
            Ok(_) => Ok(format!("{}://{location}", self.scheme)),
            Err(object_store::Error::AlreadyExists { .. }) => Err(Error::AlreadyExists {
                path: format!("{}://{location}", self.scheme),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Move an object within the destination
    ///
    /// Atomic on local filesystems; object stores degrade to copy-then-delete.
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from = self.object_path(from);
        let to = self.object_path(to);
        self.store.rename(&from, &to).await?;
        Ok(())
    }

    /// Read a full object
    pub async fn read(&self, path: &str) -> Result<Bytes> {
        let result = self.store.get(&self.object_path(path)).await?;
        Ok(result.bytes().await?)
    }

    /// Check whether an object exists at the path
    pub async fn exists(&self, path: &str) -> Result<bool> {
        match self.store.head(&self.object_path(path)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// List destination-relative object paths under a prefix, sorted
    ///
    /// An empty prefix lists the whole destination.
    pub async fn list_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let combined = self.object_path(prefix);
        let mut stream = if combined.as_ref().is_empty() {
            self.store.list(None)
        } else {
            self.store.list(Some(&combined))
        };

        let mut paths = Vec::new();
        while let Some(meta) = stream.next().await {
            paths.push(self.relative(&meta?.location));
        }
        paths.sort();
        Ok(paths)
    }

    /// Delete every object under a prefix, returning how many were removed
    pub async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let paths = self.list_prefix(prefix).await?;
        for path in &paths {
            self.store.delete(&self.object_path(path)).await?;
        }
        Ok(paths.len())
    }
}
