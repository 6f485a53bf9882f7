//! Object storage for uploaded files.
//!
//! `Storage` is the facade handlers use: it builds object keys, validates
//! client-supplied paths and resolves public URLs. The bytes live in an
//! `ObjectStore`, either S3 (AWS or MinIO) or an in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StorageSettings;
use crate::error::{AppError, AppResult};
use crate::models::FileKind;

/// Backend that holds object bytes.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: Option<&str>) -> AppResult<()>;

    /// Fetch an object and its content type. Missing objects are `NotFound`.
    async fn get(&self, key: &str) -> AppResult<(Vec<u8>, Option<String>)>;

    /// Delete an object. Deleting a missing object succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete every object under `prefix`, returning how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> AppResult<usize>;
}

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &StorageSettings) -> AppResult<Self> {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "campus-portfolio",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let store = Self {
            client: Client::from_conf(s3_config_builder.build()),
            bucket: config.bucket.clone(),
        };

        store.ensure_bucket_exists().await?;

        info!("S3 storage initialized: bucket={}", config.bucket);

        Ok(store)
    }

    /// Ensure the bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", self.bucket);
                    self.client
                        .create_bucket()
                        .bucket(&self.bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        self.bucket, service_error
                    )))
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: Option<&str>) -> AppResult<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data);
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file to S3: {}", e)))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<(Vec<u8>, Option<String>)> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    AppError::NotFound(format!("File not found: {}", key))
                } else {
                    AppError::Storage(format!("Failed to get file from S3: {}", service_error))
                }
            })?;

        let content_type = response.content_type().map(String::from);
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read S3 response body: {}", e)))?
            .into_bytes()
            .to_vec();

        Ok((data, content_type))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file from S3: {}", e)))?;

        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<usize> {
        let mut deleted = 0;
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| AppError::Storage(format!("Failed to list S3 objects: {}", e)))?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    self.delete(key).await?;
                    deleted += 1;
                }
            }

            match page.next_continuation_token() {
                Some(token) if page.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(deleted)
    }
}

/// In-memory object store for tests and for development without MinIO.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, (Vec<u8>, Option<String>)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Vec<u8>, Option<String>)>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: Option<&str>) -> AppResult<()> {
        self.objects()
            .insert(key.to_string(), (data, content_type.map(String::from)));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<(Vec<u8>, Option<String>)> {
        self.objects()
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", key)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects().remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<usize> {
        let mut objects = self.objects();
        let before = objects.len();
        objects.retain(|key, _| !key.starts_with(prefix));
        Ok(before - objects.len())
    }
}

/// Storage facade shared by the handlers.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn ObjectStore>,
    public_url: Option<String>,
}

impl Storage {
    pub fn new(store: Arc<dyn ObjectStore>, public_url: Option<String>) -> Self {
        Self { store, public_url }
    }

    /// Connect to S3. In development an unreachable endpoint falls back to
    /// in-memory storage so the API stays usable without MinIO.
    pub async fn from_settings(settings: &StorageSettings, development: bool) -> AppResult<Self> {
        match S3Store::new(settings).await {
            Ok(s3) => Ok(Self::new(Arc::new(s3), settings.public_url.clone())),
            Err(e) if development => {
                warn!("S3 unavailable ({}), using in-memory file storage", e);
                Ok(Self::in_memory())
            }
            Err(e) => Err(e),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), None)
    }

    /// Store an uploaded file and return its object key.
    pub async fn upload(
        &self,
        kind: FileKind,
        owner: Uuid,
        filename: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<String> {
        let key = Self::object_key(kind, owner, filename, chrono::Utc::now().timestamp_millis());
        let content_type = content_type
            .map(String::from)
            .unwrap_or_else(|| Self::content_type_for_filename(filename).to_string());

        self.store.put(&key, data, Some(&content_type)).await?;

        Ok(key)
    }

    pub async fn get(&self, key: &str) -> AppResult<(Vec<u8>, Option<String>)> {
        Self::validate_key(key)?;
        self.store.get(key).await
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        Self::validate_key(key)?;
        self.store.delete(key).await
    }

    /// Remove every file stored for the user `owner`, across all kinds.
    pub async fn purge_user(&self, owner: Uuid) -> AppResult<usize> {
        let mut removed = 0;

        for kind in FileKind::ALL {
            removed += self
                .store
                .delete_prefix(&format!("{}/{}/", kind.prefix(), owner))
                .await?;
        }

        Ok(removed)
    }

    /// URL a stored object is reachable at.
    pub fn url_for(&self, key: &str) -> String {
        match self.public_url {
            Some(ref base) => format!("{}/{}", base, key),
            None => format!("/api/v1/files/{}", key),
        }
    }

    /// Build an object key.
    ///
    /// # Returns
    /// Key in format: {kind}s/{user_id}/{unix_millis}_{sanitized_filename}
    ///
    /// The owner segment is the user id, so no two accounts share a prefix.
    pub fn object_key(kind: FileKind, owner: Uuid, filename: &str, unix_millis: i64) -> String {
        format!(
            "{}/{}/{}_{}",
            kind.prefix(),
            owner,
            unix_millis,
            Self::sanitize_filename(filename)
        )
    }

    /// Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn sanitize_filename(filename: &str) -> String {
        // Browsers may send a full client path
        let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

        let cleaned: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if cleaned.trim_matches('.').is_empty() {
            "file".to_string()
        } else {
            cleaned
        }
    }

    /// Accept only keys this service could have produced.
    pub fn validate_key(key: &str) -> AppResult<()> {
        let invalid = || AppError::InvalidInput(format!("Invalid file path: {}", key));

        if key.is_empty() || key.starts_with('/') || key.contains('\\') {
            return Err(invalid());
        }
        if key.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(invalid());
        }

        let known_prefix = FileKind::ALL
            .iter()
            .any(|kind| key.starts_with(&format!("{}/", kind.prefix())));
        if !known_prefix {
            return Err(invalid());
        }

        Ok(())
    }

    /// Get the content type for a file based on its extension.
    pub fn content_type_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "ppt" => "application/vnd.ms-powerpoint",
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "zip" => "application/zip",
            "txt" => "text/plain",
            "md" => "text/markdown",
            "json" => "application/json",
            _ => "application/octet-stream",
        }
    }

    pub fn content_type_for_filename(filename: &str) -> &'static str {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::content_type_for_extension(ext),
            None => "application/octet-stream",
        }
    }
}
