use chrono::{DateTime, Utc};
use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPatch, ClientBrandConfig};
use pforge_domain::screen::{ApproachScreen, ScreenOverride};
use pforge_kernel::gateway::{ApproachDirectory, ConfigGateway, GatewayError, GatewayErrorExt};
use pforge_kernel::keys::{KeyGuard, KeyKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

const CLIENTS_DIR: &str = "clients";
const APPROACHES_DIR: &str = "approaches";
const SCREENS_DIR: &str = "screens";
const BRAND_FILE: &str = "brand.json";
const TMP_MARKER: &str = ".pforgetmp";

/// On-disk override document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverrideDocument {
    #[serde(flatten)]
    record: ScreenOverride,
    updated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct FileGatewayInner {
    root: PathBuf,
    tmp_counter: AtomicU64,
    /// Serializes brand read-modify-write cycles within this process.
    brand_lock: Mutex<()>,
}

/// JSON-document gateway rooted at a directory:
///
/// ```text
/// <root>/clients/<client_id>/brand.json
/// <root>/clients/<client_id>/screens/<screen_id>.json
/// <root>/approaches/<approach_id>.json
/// ```
///
/// Every id is checked with [`KeyGuard`] before it becomes a path segment. Writes are
/// atomic: a unique temp file is written, synced and renamed over the target.
#[derive(Debug, Clone)]
pub struct FileGateway {
    inner: Arc<FileGatewayInner>,
}

impl FileGateway {
    /// Opens (and creates if missing) a store rooted at `root`.
    ///
    /// # Errors
    /// Returns [`GatewayError::Io`] if the directory layout cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, GatewayError> {
        let root = root.into();
        for dir in [CLIENTS_DIR, APPROACHES_DIR] {
            let path = root.join(dir);
            fs::create_dir_all(&path).await.context(format!("Failed to create {}", path.display()))?;
        }
        info!(root = %root.display(), "File gateway opened");
        Ok(Self {
            inner: Arc::new(FileGatewayInner {
                root,
                tmp_counter: AtomicU64::new(0),
                brand_lock: Mutex::new(()),
            }),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// # Errors
    /// [`GatewayError::InvalidKey`] for a malformed id, [`GatewayError::Conflict`] if the
    /// client already exists, [`GatewayError::Io`] on write failure.
    pub async fn create_client(&self, brand: ClientBrandConfig) -> Result<(), GatewayError> {
        let _guard = self.inner.brand_lock.lock().await;
        let path = self.brand_path(&brand.client_id)?;
        if fs::try_exists(&path).await.context("Failed to probe brand")? {
            return Err(GatewayError::Conflict {
                message: brand.client_id.into(),
                context: Some("create client".into()),
            });
        }
        self.write_json(&path, &brand).await?;
        info!(client_id = %brand.client_id, "Client created");
        Ok(())
    }

    /// Removes the client directory with every override in it. Returns the number of
    /// overrides removed.
    ///
    /// # Errors
    /// [`GatewayError::NotFound`] for an unknown client, [`GatewayError::Io`] otherwise.
    pub async fn delete_client(&self, client_id: &str) -> Result<usize, GatewayError> {
        let dir = self.client_dir(client_id)?;
        if !fs::try_exists(dir.join(BRAND_FILE)).await.context("Failed to probe brand")? {
            return Err(GatewayError::not_found(format!("client '{client_id}'")));
        }

        let mut removed = 0;
        match fs::read_dir(dir.join(SCREENS_DIR)).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await.context("Failed to list overrides")? {
                    if entry.path().extension().is_some_and(|ext| ext == "json") {
                        removed += 1;
                    }
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {},
            Err(err) => return Err(err).context("Failed to list overrides"),
        }

        fs::remove_dir_all(&dir).await.context(format!("Failed to delete {}", dir.display()))?;
        info!(client_id, overrides = removed, "Client deleted");
        Ok(removed)
    }

    /// Client ids with a stored brand, sorted.
    ///
    /// # Errors
    /// [`GatewayError::Io`] if the clients directory cannot be read.
    pub async fn list_clients(&self) -> Result<Vec<String>, GatewayError> {
        let mut ids = Vec::new();
        let mut entries =
            fs::read_dir(self.inner.root.join(CLIENTS_DIR)).await.context("Failed to list clients")?;
        while let Some(entry) = entries.next_entry().await.context("Failed to list clients")? {
            if fs::try_exists(entry.path().join(BRAND_FILE)).await.unwrap_or(false) {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Stores the screen list of an approach, ordered by `order_index`.
    ///
    /// # Errors
    /// [`GatewayError::InvalidKey`] for a malformed id, [`GatewayError::Io`] on write failure.
    pub async fn put_approach(
        &self,
        approach_id: &str,
        mut screens: Vec<ApproachScreen>,
    ) -> Result<(), GatewayError> {
        KeyGuard::verify(KeyKind::Approach, approach_id)?;
        screens.sort_by_key(|s| s.order_index);
        let path = self.inner.root.join(APPROACHES_DIR).join(format!("{approach_id}.json"));
        self.write_json(&path, &screens).await
    }

    fn client_dir(&self, client_id: &str) -> Result<PathBuf, GatewayError> {
        let client_id = KeyGuard::verify(KeyKind::Client, client_id)?;
        Ok(self.inner.root.join(CLIENTS_DIR).join(client_id))
    }

    fn brand_path(&self, client_id: &str) -> Result<PathBuf, GatewayError> {
        Ok(self.client_dir(client_id)?.join(BRAND_FILE))
    }

    fn override_path(&self, client_id: &str, screen_id: &str) -> Result<PathBuf, GatewayError> {
        let screen_id = KeyGuard::verify(KeyKind::Screen, screen_id)?;
        Ok(self.client_dir(client_id)?.join(SCREENS_DIR).join(format!("{screen_id}.json")))
    }

    async fn require_client(&self, client_id: &str) -> Result<(), GatewayError> {
        let path = self.brand_path(client_id)?;
        if fs::try_exists(&path).await.context("Failed to probe brand")? {
            Ok(())
        } else {
            Err(GatewayError::not_found(format!("client '{client_id}'")))
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, GatewayError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).context(format!("Read failed: {}", path.display())),
        };
        let value =
            serde_json::from_slice(&bytes).context(format!("Malformed document: {}", path.display()))?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize + Sync>(&self, path: &Path, value: &T) -> Result<(), GatewayError> {
        let data = serde_json::to_vec_pretty(value).context("Failed to encode document")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create {}", parent.display()))?;
        }

        let seq = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let temp = path.with_extension(format!("json{TMP_MARKER}.{}.{seq}", std::process::id()));
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err).context(format!("Atomic swap failed: {}", path.display()));
        }

        debug!(path = %path.display(), "Document saved atomically");
        Ok(())
    }
}

impl ConfigGateway for FileGateway {
    async fn load(&self, client_id: &str, screen_id: &str) -> Result<ConfigMap, GatewayError> {
        let path = self.override_path(client_id, screen_id)?;
        self.require_client(client_id).await?;
        let document = Self::read_json::<OverrideDocument>(&path).await?;
        Ok(document.map(|doc| doc.record.settings).unwrap_or_default())
    }

    async fn save(
        &self,
        client_id: &str,
        screen_id: &str,
        settings: ConfigMap,
    ) -> Result<(), GatewayError> {
        let path = self.override_path(client_id, screen_id)?;
        self.require_client(client_id).await?;
        let document = OverrideDocument {
            record: ScreenOverride::new(client_id, screen_id, settings),
            updated_at: Utc::now(),
        };
        self.write_json(&path, &document).await
    }

    async fn load_brand(&self, client_id: &str) -> Result<ClientBrandConfig, GatewayError> {
        let path = self.brand_path(client_id)?;
        Self::read_json(&path)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("client '{client_id}'")))
    }

    async fn update_brand(
        &self,
        client_id: &str,
        patch: BrandPatch,
    ) -> Result<ClientBrandConfig, GatewayError> {
        let path = self.brand_path(client_id)?;
        let _guard = self.inner.brand_lock.lock().await;
        let mut brand: ClientBrandConfig = Self::read_json(&path)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("client '{client_id}'")))?;
        patch.apply_to(&mut brand);
        self.write_json(&path, &brand).await?;
        Ok(brand)
    }
}

impl ApproachDirectory for FileGateway {
    async fn approach_screens(&self, approach_id: &str) -> Result<Vec<ApproachScreen>, GatewayError> {
        KeyGuard::verify(KeyKind::Approach, approach_id)?;
        let path = self.inner.root.join(APPROACHES_DIR).join(format!("{approach_id}.json"));
        Ok(Self::read_json(&path).await?.unwrap_or_default())
    }
}
