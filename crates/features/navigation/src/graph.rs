use crate::error::NavigationError;
use pforge_domain::ConfigMap;
use pforge_domain::constants::NAVIGATION_CONFIG;
use pforge_domain::navigation::{NavigationEdge, NavigationTarget};
use pforge_domain::screen::ApproachScreen;
use pforge_resolver::ResolvedConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Outgoing edges of one screen, keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationGraph {
    source_screen_id: String,
    edges: BTreeMap<String, NavigationTarget>,
}

impl NavigationGraph {
    #[must_use]
    pub fn new(source_screen_id: impl Into<String>) -> Self {
        Self { source_screen_id: source_screen_id.into(), edges: BTreeMap::new() }
    }

    /// Reads the `navigation_config` map of `config`. Entries that are neither an
    /// object nor a bare target id are skipped; a missing `enabled` means enabled.
    #[must_use]
    pub fn from_config(source_screen_id: impl Into<String>, config: &ConfigMap) -> Self {
        let mut graph = Self::new(source_screen_id);
        let Some(entries) = config.get(NAVIGATION_CONFIG).and_then(Value::as_object) else {
            return graph;
        };
        for (element_id, raw) in entries {
            match NavigationTarget::from_value(raw) {
                Some(target) => {
                    graph.edges.insert(element_id.clone(), target);
                },
                None => {
                    debug!(screen_id = %graph.source_screen_id, element_id, "Skipping malformed navigation entry");
                },
            }
        }
        graph
    }

    #[must_use]
    pub fn from_resolved(resolved: &ResolvedConfig) -> Self {
        Self::from_config(resolved.screen_id.clone(), &resolved.config)
    }

    #[must_use]
    pub fn source_screen_id(&self) -> &str {
        &self.source_screen_id
    }

    /// Target of `element_id` on `screen_id`. Disabled edges, blank targets and
    /// lookups for another screen all yield `None`.
    #[must_use]
    pub fn resolve(&self, screen_id: &str, element_id: &str) -> Option<&str> {
        if screen_id != self.source_screen_id {
            return None;
        }
        let target = self.edges.get(element_id)?.active_target();
        trace!(screen_id, element_id, target, "Navigation lookup");
        target
    }

    /// Points `element_id` at `target`. A `None` or blank target deletes the edge
    /// entirely. Returns the previous target, if any.
    ///
    /// # Errors
    /// [`NavigationError::Validation`] for a blank element id.
    pub fn set_edge(
        &mut self,
        element_id: &str,
        target: Option<&str>,
    ) -> Result<Option<NavigationTarget>, NavigationError> {
        if element_id.trim().is_empty() {
            return Err(NavigationError::Validation {
                message: "element id must not be empty".into(),
                context: Some(self.source_screen_id.clone().into()),
            });
        }

        match target.map(str::trim).filter(|t| !t.is_empty()) {
            Some(target) => {
                debug!(screen_id = %self.source_screen_id, element_id, target, "Edge set");
                Ok(self.edges.insert(element_id.to_owned(), NavigationTarget::new(target)))
            },
            None => {
                debug!(screen_id = %self.source_screen_id, element_id, "Edge cleared");
                Ok(self.edges.remove(element_id))
            },
        }
    }

    /// Toggles an existing edge without losing its target.
    ///
    /// # Errors
    /// [`NavigationError::UnknownElement`] when `element_id` has no edge.
    pub fn set_enabled(&mut self, element_id: &str, enabled: bool) -> Result<(), NavigationError> {
        let edge = self.edges.get_mut(element_id).ok_or_else(|| NavigationError::UnknownElement {
            element_id: element_id.to_owned(),
            context: Some(self.source_screen_id.clone().into()),
        })?;
        edge.enabled = enabled;
        Ok(())
    }

    /// Every stored edge, including disabled ones, ordered by element id.
    #[must_use]
    pub fn edges(&self) -> Vec<NavigationEdge> {
        self.edges
            .iter()
            .map(|(element_id, target)| NavigationEdge {
                source_screen_id: self.source_screen_id.clone(),
                element_id: element_id.clone(),
                target_screen_id: target.target_screen_id.clone(),
                enabled: target.enabled,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The `navigation_config` value for these edges.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.edges.iter().map(|(id, target)| (id.clone(), target.to_value())).collect())
    }

    /// Replaces the `navigation_config` key of `config` with these edges.
    pub fn write_into(&self, config: &mut ConfigMap) {
        config.insert(NAVIGATION_CONFIG.to_owned(), self.to_value());
    }

    /// Candidate targets for a picker, ordered by `order_index`. Purely advisory:
    /// [`Self::set_edge`] accepts targets outside this list.
    #[must_use]
    pub fn target_options(approach: &[ApproachScreen]) -> Vec<ApproachScreen> {
        let mut options = approach.to_vec();
        options.sort_by_key(|screen| screen.order_index);
        options
    }
}
