use crate::error::{SessionError, SessionErrorExt};
use fxhash::FxHashSet;
use moka::sync::Cache;
use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPatch, ClientBrandConfig, PalettePatch};
use pforge_domain::constants::NAVIGATION_CONFIG;
use pforge_domain::screen::ApproachScreen;
use pforge_event_bus::{EventReceiverExt, Receiver};
use pforge_kernel::gateway::{ApproachDirectory, ConfigGateway};
use pforge_kernel::safe_nanoid;
use pforge_navigation::NavigationGraph;
use pforge_registry::{EditorField, ScreenDefinition};
use pforge_resolver::{BrandChanged, ConfigResolver, ResolvedConfig, inherit};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

fn no_active(op: &'static str) -> SessionError {
    SessionError::NoActiveScreen { context: Some(op.into()) }
}

#[derive(Debug)]
struct ActiveScreen {
    resolved: ResolvedConfig,
    graph: NavigationGraph,
}

impl ActiveScreen {
    fn new(resolved: ResolvedConfig) -> Self {
        let graph = NavigationGraph::from_resolved(&resolved);
        Self { resolved, graph }
    }
}

/// One operator editing one client's screens.
///
/// Screen switches are cooperative: [`Self::activate`] first flushes unsaved edits of
/// the outgoing screen (best effort, a failure only logs), then resolves the incoming
/// one. Every activation reads the saved override again; only unsaved edits are
/// replayed on top of it. Saves are independent gateway round-trips with no retry.
#[derive(Debug)]
pub struct EditorSession<G> {
    id: String,
    client_id: String,
    brand: ClientBrandConfig,
    resolver: ConfigResolver<G>,
    /// Unsaved edited keys per dirty screen id.
    cache: Cache<String, ConfigMap>,
    dirty: FxHashSet<String>,
    active: Option<ActiveScreen>,
    brand_events: Receiver<Arc<BrandChanged>>,
}

impl<G: ConfigGateway + ApproachDirectory> EditorSession<G> {
    /// Starts a session for `client_id`. A brand that cannot be loaded degrades to an
    /// unbranded one so screens still render.
    ///
    /// # Errors
    /// [`SessionError::Validation`] for a blank client id or a zero cache capacity.
    pub async fn open(
        resolver: ConfigResolver<G>,
        client_id: &str,
        cache_capacity: u64,
    ) -> Result<Self, SessionError> {
        if client_id.trim().is_empty() {
            return Err(SessionError::Validation {
                message: "client id must not be empty".into(),
                context: None,
            });
        }
        if cache_capacity == 0 {
            return Err(SessionError::Validation {
                message: "cache capacity must be >= 1".into(),
                context: None,
            });
        }

        let brand_events = resolver.events().subscribe::<BrandChanged>().context("brand events")?;
        let brand = match resolver.gateway().load_brand(client_id).await {
            Ok(brand) => brand,
            Err(err) => {
                warn!(client_id, error = %err, "Brand unavailable, session starts unbranded");
                ClientBrandConfig::unbranded(client_id)
            },
        };

        let id = safe_nanoid!();
        info!(session_id = %id, client_id, "Editing session opened");
        Ok(Self {
            id,
            client_id: client_id.to_owned(),
            brand,
            resolver,
            cache: Cache::builder().max_capacity(cache_capacity).build(),
            dirty: FxHashSet::default(),
            active: None,
            brand_events,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub const fn brand(&self) -> &ClientBrandConfig {
        &self.brand
    }

    /// The active screen's working configuration.
    #[must_use]
    pub fn active(&self) -> Option<&ResolvedConfig> {
        self.active.as_ref().map(|a| &a.resolved)
    }

    #[must_use]
    pub fn graph(&self) -> Option<&NavigationGraph> {
        self.active.as_ref().map(|a| &a.graph)
    }

    #[must_use]
    pub fn is_dirty(&self, screen_id: &str) -> bool {
        self.dirty.contains(screen_id)
    }

    /// Switches to `screen_id`.
    ///
    /// # Errors
    /// [`SessionError::Resolver`] if the incoming screen cannot be resolved; the
    /// previous screen stays active in that case.
    #[instrument(skip(self), fields(session_id = %self.id, client_id = %self.client_id))]
    pub async fn activate(&mut self, screen_id: &str) -> Result<&ResolvedConfig, SessionError> {
        self.flush_outgoing(screen_id).await;
        self.apply_brand_events();

        let resolved = self.resolve(screen_id).await.context("activate")?;
        let active = self.active.insert(ActiveScreen::new(resolved));
        Ok(&active.resolved)
    }

    /// Sets one key of the active screen's working configuration.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`], or [`SessionError::Validation`] for a blank key.
    pub fn edit(&mut self, key: &str, value: Value) -> Result<(), SessionError> {
        if key.trim().is_empty() {
            return Err(SessionError::Validation { message: "key must not be empty".into(), context: None });
        }
        let active = self.active.as_mut().ok_or_else(|| no_active("edit"))?;
        active.resolved.config.insert(key.to_owned(), value.clone());
        if key == NAVIGATION_CONFIG {
            active.graph = NavigationGraph::from_resolved(&active.resolved);
        }
        let screen_id = active.resolved.screen_id.clone();
        self.record(screen_id, [(key.to_owned(), value)]);
        Ok(())
    }

    /// Points an element of the active screen at `target`; `None` deletes the edge.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`] or [`SessionError::Navigation`] for a blank element.
    pub fn set_edge(&mut self, element_id: &str, target: Option<&str>) -> Result<(), SessionError> {
        let active =
            self.active.as_mut().ok_or_else(|| no_active("set edge"))?;
        active.graph.set_edge(element_id, target).context(element_id.to_owned())?;
        active.graph.write_into(&mut active.resolved.config);
        let screen_id = active.resolved.screen_id.clone();
        let navigation = active.graph.to_value();
        self.record(screen_id, [(NAVIGATION_CONFIG.to_owned(), navigation)]);
        Ok(())
    }

    /// Follows `element_id` on the active screen.
    #[must_use]
    pub fn navigate(&self, element_id: &str) -> Option<String> {
        let active = self.active.as_ref()?;
        active.graph.resolve(&active.resolved.screen_id, element_id).map(str::to_owned)
    }

    /// Saves the active screen. Returns `false` when the gateway call failed or the saved
    /// override still cannot be read; the edits stay in the session for a manual retry.
    ///
    /// A screen resolved without its saved override is re-resolved first, so a save
    /// never writes defaults over values stored earlier.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`].
    #[instrument(skip(self), fields(session_id = %self.id, client_id = %self.client_id))]
    pub async fn save(&mut self) -> Result<bool, SessionError> {
        if self.active.as_ref().ok_or_else(|| no_active("save"))?.resolved.degraded {
            self.refresh_active().await?;
        }
        let (screen_id, config) = {
            let active = self.active.as_ref().ok_or_else(|| no_active("save"))?;
            if active.resolved.degraded {
                warn!(screen_id = %active.resolved.screen_id, "Saved override unreadable, save refused");
                return Ok(false);
            }
            (active.resolved.screen_id.clone(), active.resolved.config.clone())
        };

        let outcome = match self.resolver.try_save(&self.client_id, &screen_id, &config).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(screen_id = %screen_id, error = %err, "Save failed, edits kept in session");
                return Ok(false);
            },
        };
        self.mark_clean(&screen_id);

        if let Some(brand) = outcome.brand {
            let palette_changed = brand.palette != self.brand.palette;
            self.brand = brand;
            if palette_changed {
                self.invalidate_all("palette saved");
            }
        }
        self.apply_brand_events();
        self.refresh_active().await?;
        Ok(true)
    }

    /// Replaces the active screen's working configuration with registry defaults plus the
    /// current brand. Nothing is persisted until the next save.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`] or [`SessionError::Resolver`].
    pub fn reset_to_default(&mut self) -> Result<&ResolvedConfig, SessionError> {
        let active =
            self.active.as_mut().ok_or_else(|| no_active("reset"))?;
        let config = self.resolver.reset_to_default(&active.resolved.screen_id, &self.brand).context("reset")?;
        active.resolved.config = config.clone();
        active.graph = NavigationGraph::from_resolved(&active.resolved);
        let screen_id = active.resolved.screen_id.clone();
        self.cache.invalidate(&screen_id);
        self.record(screen_id, config);
        self.active().ok_or_else(|| no_active("reset"))
    }

    /// Writes palette changes to the client brand, then drops every cached screen and
    /// re-resolves the active one.
    ///
    /// # Errors
    /// [`SessionError::Gateway`] when the brand update fails.
    #[instrument(skip(self, patch), fields(session_id = %self.id, client_id = %self.client_id))]
    pub async fn update_palette(&mut self, patch: PalettePatch) -> Result<(), SessionError> {
        if patch.is_empty() {
            return Ok(());
        }
        let brand_patch = BrandPatch { palette: patch, ..BrandPatch::default() };
        let updated = self
            .resolver
            .gateway()
            .update_brand(&self.client_id, brand_patch)
            .await
            .context("update palette")?;

        let event = BrandChanged { client_id: updated.client_id.clone(), palette: updated.palette.clone() };
        if let Err(err) = self.resolver.events().publish(event) {
            warn!(error = %err, "Brand change not published");
        }

        self.brand = updated;
        self.invalidate_all("palette updated");
        self.apply_brand_events();
        self.refresh_active().await
    }

    /// Renders the active screen with render-time color inheritance applied.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`].
    pub fn preview(&self) -> Result<String, SessionError> {
        let (definition, config) = self.active_definition("preview")?;
        let settings = inherit(&self.brand.palette, config);
        Ok(definition.renderer.render(&settings))
    }

    /// Editable fields of the active screen.
    ///
    /// # Errors
    /// [`SessionError::NoActiveScreen`].
    pub fn fields(&self) -> Result<Vec<EditorField>, SessionError> {
        Ok(self.active_definition("fields")?.0.editor.fields())
    }

    /// Navigation picker candidates from the client's approach, in order. Empty when the
    /// client has no approach.
    ///
    /// # Errors
    /// [`SessionError::Gateway`] when the lookup fails.
    pub async fn target_options(&self) -> Result<Vec<ApproachScreen>, SessionError> {
        let Some(approach_id) = self.brand.approach_id.as_deref() else {
            return Ok(Vec::new());
        };
        let screens =
            self.resolver.gateway().approach_screens(approach_id).await.context("target options")?;
        Ok(NavigationGraph::target_options(&screens))
    }

    fn active_definition(
        &self,
        op: &'static str,
    ) -> Result<(Arc<ScreenDefinition>, &ConfigMap), SessionError> {
        let active = self.active.as_ref().ok_or_else(|| no_active(op))?;
        let definition = self.resolver.registry().get(&active.resolved.screen_id).ok_or_else(|| {
            SessionError::Internal {
                message: format!("screen '{}' vanished from registry", active.resolved.screen_id).into(),
                context: Some(op.into()),
            }
        })?;
        Ok((definition, &active.resolved.config))
    }

    /// Merges edited keys into the screen's pending edits and marks it dirty.
    fn record(&mut self, screen_id: String, edits: impl IntoIterator<Item = (String, Value)>) {
        let mut pending = self.cache.get(&screen_id).unwrap_or_default();
        pending.extend(edits);
        self.cache.insert(screen_id.clone(), pending);
        self.dirty.insert(screen_id);
    }

    fn mark_clean(&mut self, screen_id: &str) {
        self.dirty.remove(screen_id);
        self.cache.invalidate(screen_id);
    }

    /// Unsaved edits of a dirty screen. Edits evicted from the cache are lost.
    fn pending_edits(&mut self, screen_id: &str) -> Option<ConfigMap> {
        if !self.dirty.contains(screen_id) {
            return None;
        }
        let pending = self.cache.get(screen_id);
        if pending.is_none() {
            warn!(screen_id, "Unsaved edits evicted from session cache");
            self.dirty.remove(screen_id);
        }
        pending
    }

    /// Reads the saved override again and replays pending edits on top.
    async fn resolve(&mut self, screen_id: &str) -> Result<ResolvedConfig, SessionError> {
        let pending = self.pending_edits(screen_id);
        let resolved =
            self.resolver.resolve(&self.client_id, screen_id, &self.brand, pending.as_ref()).await?;
        Ok(resolved)
    }

    async fn flush_outgoing(&mut self, incoming: &str) {
        let Some(active) = self.active.as_ref() else { return };
        let outgoing = active.resolved.screen_id.clone();
        if outgoing == incoming || !self.dirty.contains(&outgoing) {
            return;
        }
        if active.resolved.degraded {
            warn!(screen_id = %outgoing, "Saved override unreadable, edits kept unsaved");
            return;
        }

        let config = active.resolved.config.clone();
        if self.resolver.save(&self.client_id, &outgoing, &config).await {
            debug!(screen_id = %outgoing, "Pending edits flushed");
            self.mark_clean(&outgoing);
        } else {
            warn!(screen_id = %outgoing, "Flush on switch failed, edits kept in session");
        }
    }

    /// Applies palette changes published for this client since the last check.
    fn apply_brand_events(&mut self) {
        let mut changed = false;
        for event in self.brand_events.drain() {
            if event.client_id == self.client_id && event.palette != self.brand.palette {
                self.brand.palette = event.palette.clone();
                changed = true;
            }
        }
        if changed {
            self.invalidate_all("palette changed elsewhere");
        }
    }

    fn invalidate_all(&mut self, reason: &'static str) {
        if !self.dirty.is_empty() {
            warn!(screens = ?self.dirty, reason, "Discarding unsaved edits on palette change");
            self.dirty.clear();
        }
        self.cache.invalidate_all();
        debug!(reason, "Session cache invalidated");
    }

    async fn refresh_active(&mut self) -> Result<(), SessionError> {
        let Some(screen_id) = self.active.as_ref().map(|a| a.resolved.screen_id.clone()) else {
            return Ok(());
        };
        let resolved = self.resolve(&screen_id).await.context("refresh")?;
        self.active = Some(ActiveScreen::new(resolved));
        Ok(())
    }
}
