use crate::failure::{FailureInjector, GatewayOp};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPatch, ClientBrandConfig};
use pforge_domain::screen::{ApproachScreen, ScreenOverride};
use pforge_kernel::gateway::{ApproachDirectory, ConfigGateway, GatewayError};
use pforge_kernel::keys::{KeyGuard, KeyKind};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct MemoryState {
    brands: FxHashMap<String, ClientBrandConfig>,
    overrides: FxHashMap<(String, String), ScreenOverride>,
    approaches: FxHashMap<String, Vec<ApproachScreen>>,
}

/// In-process gateway. Clones share the same state and fault table.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<FailureInjector>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fault and latency table consulted before every contract call.
    #[must_use]
    pub fn faults(&self) -> &FailureInjector {
        &self.faults
    }

    /// # Errors
    /// [`GatewayError::InvalidKey`] for a malformed id, [`GatewayError::Conflict`] if the
    /// client already exists.
    pub fn create_client(&self, brand: ClientBrandConfig) -> Result<(), GatewayError> {
        KeyGuard::verify(KeyKind::Client, &brand.client_id)?;
        let mut state = self.state.write();
        if state.brands.contains_key(&brand.client_id) {
            return Err(GatewayError::Conflict {
                message: brand.client_id.into(),
                context: Some("create client".into()),
            });
        }
        info!(client_id = %brand.client_id, "Client created");
        state.brands.insert(brand.client_id.clone(), brand);
        Ok(())
    }

    /// Removes the client and every override it owns. Returns the number of overrides removed.
    ///
    /// # Errors
    /// [`GatewayError::NotFound`] for an unknown client.
    pub fn delete_client(&self, client_id: &str) -> Result<usize, GatewayError> {
        let mut state = self.state.write();
        if state.brands.remove(client_id).is_none() {
            return Err(GatewayError::not_found(format!("client '{client_id}'")));
        }
        let before = state.overrides.len();
        state.overrides.retain(|(client, _), _| client != client_id);
        let removed = before - state.overrides.len();
        info!(client_id, overrides = removed, "Client deleted");
        Ok(removed)
    }

    /// Stores the screen list of an approach, ordered by `order_index`.
    ///
    /// # Errors
    /// [`GatewayError::InvalidKey`] for a malformed approach id.
    pub fn put_approach(
        &self,
        approach_id: &str,
        mut screens: Vec<ApproachScreen>,
    ) -> Result<(), GatewayError> {
        KeyGuard::verify(KeyKind::Approach, approach_id)?;
        screens.sort_by_key(|s| s.order_index);
        self.state.write().approaches.insert(approach_id.to_owned(), screens);
        Ok(())
    }

    /// The stored override for a pair, bypassing fault injection.
    #[must_use]
    pub fn stored_override(&self, client_id: &str, screen_id: &str) -> Option<ConfigMap> {
        let key = (client_id.to_owned(), screen_id.to_owned());
        self.state.read().overrides.get(&key).map(|o| o.settings.clone())
    }

    /// The stored brand, bypassing fault injection.
    #[must_use]
    pub fn stored_brand(&self, client_id: &str) -> Option<ClientBrandConfig> {
        self.state.read().brands.get(client_id).cloned()
    }

    async fn gate(&self, op: GatewayOp) -> Result<(), GatewayError> {
        let verdict = self.faults.check(op);
        if let Some(delay) = verdict.delay {
            tokio::time::sleep(delay).await;
        }
        verdict.error.map_or(Ok(()), Err)
    }

    fn unknown_client(client_id: &str) -> GatewayError {
        GatewayError::not_found(format!("client '{client_id}'"))
    }
}

impl ConfigGateway for MemoryGateway {
    async fn load(&self, client_id: &str, screen_id: &str) -> Result<ConfigMap, GatewayError> {
        self.gate(GatewayOp::Load).await?;
        let state = self.state.read();
        if !state.brands.contains_key(client_id) {
            return Err(Self::unknown_client(client_id));
        }
        let key = (client_id.to_owned(), screen_id.to_owned());
        Ok(state.overrides.get(&key).map(|o| o.settings.clone()).unwrap_or_default())
    }

    async fn save(
        &self,
        client_id: &str,
        screen_id: &str,
        settings: ConfigMap,
    ) -> Result<(), GatewayError> {
        self.gate(GatewayOp::Save).await?;
        KeyGuard::verify(KeyKind::Screen, screen_id)?;
        let mut state = self.state.write();
        if !state.brands.contains_key(client_id) {
            return Err(Self::unknown_client(client_id));
        }
        debug!(client_id, screen_id, keys = settings.len(), "Override stored");
        let record = ScreenOverride::new(client_id, screen_id, settings);
        state.overrides.insert((client_id.to_owned(), screen_id.to_owned()), record);
        Ok(())
    }

    async fn load_brand(&self, client_id: &str) -> Result<ClientBrandConfig, GatewayError> {
        self.gate(GatewayOp::LoadBrand).await?;
        self.state.read().brands.get(client_id).cloned().ok_or_else(|| Self::unknown_client(client_id))
    }

    async fn update_brand(
        &self,
        client_id: &str,
        patch: BrandPatch,
    ) -> Result<ClientBrandConfig, GatewayError> {
        self.gate(GatewayOp::UpdateBrand).await?;
        let mut state = self.state.write();
        let brand = state.brands.get_mut(client_id).ok_or_else(|| Self::unknown_client(client_id))?;
        patch.apply_to(brand);
        debug!(client_id, "Brand updated");
        Ok(brand.clone())
    }
}

impl ApproachDirectory for MemoryGateway {
    async fn approach_screens(&self, approach_id: &str) -> Result<Vec<ApproachScreen>, GatewayError> {
        self.gate(GatewayOp::ApproachScreens).await?;
        Ok(self.state.read().approaches.get(approach_id).cloned().unwrap_or_default())
    }
}
