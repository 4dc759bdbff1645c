//! Tab Session Manager
//!
//! Owns the ordered tab collection of one session key and writes it through
//! to the store on every mutation. Each mutation works on a copy of the
//! collection and only commits it in memory once the store accepted it.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use tabdeck_storage::SessionStore;
use tabdeck_tabs::{tab_id, AddTab, Tab, TabInit, UpdateTabUrl};

use crate::document::{read_tabs, write_tabs};
use crate::policy::FallbackPolicy;
use crate::Result;

/// How [`TabSessionManager::init_tabs`] treats persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Ignore persisted tabs and build purely from the descriptors
    pub reinitialize: bool,
    /// Ids dropped from the restored collection before merging
    pub tabs_to_remove: Vec<String>,
    /// Clear the restored selection and take it from the descriptors instead
    pub override_selection: bool,
}

impl InitOptions {
    pub fn reinitialize() -> Self {
        Self {
            reinitialize: true,
            ..Self::default()
        }
    }

    pub fn removing<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tabs_to_remove.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn overriding_selection(mut self) -> Self {
        self.override_selection = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTabOutcome {
    /// A new tab was opened
    Created,
    /// An existing tab was reselected
    Focused,
    /// Name, url or kind was missing; nothing changed
    Ignored,
}

impl AddTabOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, AddTabOutcome::Created)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseMode {
    Remove,
    Stop,
}

#[derive(Debug, Default)]
struct SessionState {
    tabs: Vec<Tab>,
    /// Tab that was selected before the current one
    previous_active_id: Option<String>,
}

pub struct TabSessionManager {
    session_key: String,
    store: Arc<dyn SessionStore>,
    policy: FallbackPolicy,
    state: Arc<RwLock<SessionState>>,
}

impl TabSessionManager {
    pub fn new(session_key: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self::with_policy(session_key, store, FallbackPolicy::default())
    }

    pub fn with_policy(
        session_key: impl Into<String>,
        store: Arc<dyn SessionStore>,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            session_key: session_key.into(),
            store,
            policy,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Snapshot of the collection in display order
    pub fn tabs(&self) -> Vec<Tab> {
        self.state.read().tabs.clone()
    }

    pub fn get_tab_by_id(&self, id: &str) -> Option<Tab> {
        self.state.read().tabs.iter().find(|tab| tab.id == id).cloned()
    }

    pub fn selected_tab(&self) -> Option<Tab> {
        self.state.read().tabs.iter().find(|tab| tab.is_selected).cloned()
    }

    pub fn get_tab_id(&self, id_prefix: &str, name: &str, kind: Option<&str>) -> String {
        tab_id(id_prefix, name, kind)
    }

    /// Build the session from persisted state merged with `initial_tabs`.
    ///
    /// Restored tabs keep their selection unless `override_selection` is set,
    /// in which case a matching descriptor's flag decides it. Descriptors match
    /// restored tabs by id, then by name; unmatched descriptors are appended.
    /// If nothing ends up selected the fallback index is selected. The result
    /// is sorted and fully overwrites the persisted slot.
    pub fn init_tabs(&self, initial_tabs: &[TabInit], options: InitOptions) -> Result<Vec<Tab>> {
        let mut state = self.state.write();

        let mut tabs = if options.reinitialize {
            Vec::new()
        } else {
            self.load_persisted()?
        };

        if !tabs.is_empty() {
            for tab in &mut tabs {
                if options.override_selection {
                    tab.deselect();
                }
                tab.touch_sync();
            }
            tabs.retain(|tab| !options.tabs_to_remove.contains(&tab.id));
        }

        let mut selection_claimed = keep_first_selected(&mut tabs);
        // Names only match restored tabs, never descriptors appended below
        let restored_len = tabs.len();

        for init in initial_tabs {
            let id = init.resolved_id();
            let existing = tabs.iter().position(|tab| tab.id == id).or_else(|| {
                tabs[..restored_len]
                    .iter()
                    .position(|tab| tab.name == init.name)
            });

            match existing {
                Some(index) => {
                    if options.override_selection {
                        let is_selected = init.is_selected && !selection_claimed;
                        tabs[index].is_selected = is_selected;
                        selection_claimed |= is_selected;
                    }
                }
                None => {
                    let mut tab = Tab::from_init(init);
                    if tab.is_selected && selection_claimed {
                        tab.deselect();
                    }
                    selection_claimed |= tab.is_selected;
                    tabs.push(tab);
                }
            }
        }

        if !selection_claimed {
            if let Some(index) = self.policy.initial(tabs.len()) {
                tabs[index].select();
            }
        }

        tabs.sort_by_key(|tab| tab.position);

        self.persist(&tabs)?;
        state.tabs = tabs.clone();
        state.previous_active_id = None;

        tracing::info!(
            session_key = %self.session_key,
            tab_count = tabs.len(),
            reinitialize = options.reinitialize,
            "Initialized tab session"
        );

        Ok(tabs)
    }

    /// Open a resource tab, or focus it when it is already open.
    pub fn add_tab(&self, request: AddTab) -> Result<AddTabOutcome> {
        if let Err(e) = request.validate() {
            tracing::debug!(session_key = %self.session_key, error = %e, "Ignoring add tab request");
            return Ok(AddTabOutcome::Ignored);
        }

        let id = request.id();
        let title = request.title();

        let mut state = self.state.write();
        let mut tabs = state.tabs.clone();

        let previous_active_id = tabs
            .iter()
            .find(|tab| tab.is_selected && !tab.matches_id_ignore_case(&id))
            .map(|tab| tab.id.clone());

        let mut found = false;
        for tab in &mut tabs {
            if !found && tab.matches_id_ignore_case(&id) && tab.title.eq_ignore_ascii_case(&title) {
                found = true;
                tab.is_selected = true;
                tab.navigate(request.url.clone());
                tab.dynamic_title = request.dynamic_title.clone().unwrap_or_default();
            } else {
                tab.deselect();
            }
        }

        if !found {
            tabs.push(Tab::from_request(&request));
            tabs.sort_by_key(|tab| tab.position);
        }

        self.persist(&tabs)?;
        state.tabs = tabs;
        if previous_active_id.is_some() {
            state.previous_active_id = previous_active_id;
        }

        if found {
            tracing::debug!(tab_id = %id, "Focused existing tab");
            Ok(AddTabOutcome::Focused)
        } else {
            tracing::info!(tab_id = %id, url = %request.url, "Created new tab");
            Ok(AddTabOutcome::Created)
        }
    }

    /// Remove a tab. Returns the url of the tab that inherited the
    /// selection, or an empty string when the selection did not move.
    pub fn remove_tab_by_identifier(&self, id: &str) -> Result<String> {
        self.close_tab(id, CloseMode::Remove)
    }

    /// Deactivate a tab without removing it. Same return as removal.
    pub fn stop_tab_by_identifier(&self, id: &str) -> Result<String> {
        self.close_tab(id, CloseMode::Stop)
    }

    pub fn mark_tab_active_by_identifier(
        &self,
        id_prefix: &str,
        name: &str,
        kind: Option<&str>,
        url: Option<&str>,
    ) -> Result<bool> {
        self.mark_tab_active_by_id(&tab_id(id_prefix, name, kind), url)
    }

    /// Select the tab with `id`, optionally moving it to `url`. A miss
    /// leaves the session untouched.
    pub fn mark_tab_active_by_id(&self, id: &str, url: Option<&str>) -> Result<bool> {
        if id.is_empty() {
            return Ok(false);
        }

        let mut state = self.state.write();
        let Some(index) = state.tabs.iter().position(|tab| tab.id == id) else {
            return Ok(false);
        };

        let mut tabs = state.tabs.clone();
        let previous_active_id = tabs
            .iter()
            .find(|tab| tab.is_selected && tab.id != id)
            .map(|tab| tab.id.clone());

        for (i, tab) in tabs.iter_mut().enumerate() {
            if i == index {
                tab.select();
                if let Some(url) = url.filter(|url| !url.is_empty()) {
                    tab.navigate(url.to_string());
                }
            } else {
                tab.deselect();
            }
        }

        self.persist(&tabs)?;
        state.tabs = tabs;
        if previous_active_id.is_some() {
            state.previous_active_id = previous_active_id;
        }

        tracing::debug!(tab_id = %id, "Marked tab active");

        Ok(true)
    }

    /// Flag the tab's resource as deleted. The tab stays open and selected.
    pub fn mark_tab_resource_deleted_by_identifier(
        &self,
        id_prefix: &str,
        name: &str,
        kind: Option<&str>,
    ) -> Result<bool> {
        self.update_tab(&tab_id(id_prefix, name, kind), Tab::mark_deleted)
    }

    pub fn update_tab_url(&self, request: UpdateTabUrl) -> Result<bool> {
        self.update_tab(&request.id, |tab| {
            if request.retain_search_params {
                tab.navigate_retaining_query(&request.url);
            } else {
                tab.navigate(request.url.clone());
            }
            if let Some(dynamic_title) = request.dynamic_title.filter(|title| !title.is_empty()) {
                tab.dynamic_title = dynamic_title;
            }
        })
    }

    /// Change the display title without touching the tab's identity.
    pub fn rename_tab(&self, id: &str, dynamic_title: impl Into<String>) -> Result<bool> {
        let dynamic_title = dynamic_title.into();
        self.update_tab(id, |tab| tab.dynamic_title = dynamic_title)
    }

    /// Force a remount of one tab.
    pub fn update_tab_component_key(&self, id: &str) -> Result<bool> {
        self.update_tab(id, Tab::remount)
    }

    /// Force a remount of every tab in the session.
    pub fn update_all_component_keys(&self) -> Result<()> {
        self.update_all(Tab::remount)
    }

    pub fn update_tab_last_sync_moment(&self, id: &str) -> Result<bool> {
        self.update_tab(id, Tab::touch_sync)
    }

    pub fn update_all_last_sync_moments(&self) -> Result<()> {
        self.update_all(Tab::touch_sync)
    }

    fn close_tab(&self, id: &str, mode: CloseMode) -> Result<String> {
        let mut state = self.state.write();
        let Some(target) = state.tabs.iter().position(|tab| tab.id == id) else {
            return Ok(String::new());
        };

        let mut tabs = state.tabs.clone();
        let was_selected = tabs[target].is_selected;
        let mut next_url = String::new();

        if was_selected {
            let fallback =
                self.policy
                    .resolve(&tabs, target, state.previous_active_id.as_deref());
            if let Some(index) = fallback {
                tabs[index].is_selected = true;
                next_url = tabs[index].url.clone();
                tracing::debug!(
                    closed = %id,
                    selected = %tabs[index].id,
                    "Moved selection to fallback tab"
                );
            }
        }

        match mode {
            CloseMode::Stop => tabs[target].stop(),
            CloseMode::Remove => {
                tabs.remove(target);
            }
        }

        self.persist(&tabs)?;
        state.tabs = tabs;
        if was_selected {
            state.previous_active_id = None;
        }

        tracing::info!(tab_id = %id, mode = ?mode, "Closed tab");

        Ok(next_url)
    }

    fn update_tab<F>(&self, id: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut Tab),
    {
        let mut state = self.state.write();
        let Some(index) = state.tabs.iter().position(|tab| tab.id == id) else {
            return Ok(false);
        };

        let mut tabs = state.tabs.clone();
        f(&mut tabs[index]);

        self.persist(&tabs)?;
        state.tabs = tabs;
        Ok(true)
    }

    fn update_all<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&mut Tab),
    {
        let mut state = self.state.write();
        let mut tabs = state.tabs.clone();
        tabs.iter_mut().for_each(f);

        self.persist(&tabs)?;
        state.tabs = tabs;
        Ok(())
    }

    /// Persisted tabs with duplicate ids dropped, empty when nothing usable is stored.
    fn load_persisted(&self) -> Result<Vec<Tab>> {
        let mut tabs = read_tabs(self.store.as_ref(), &self.session_key)?.unwrap_or_default();
        let mut seen = HashSet::new();
        tabs.retain(|tab| seen.insert(tab.id.clone()));
        Ok(tabs)
    }

    fn persist(&self, tabs: &[Tab]) -> Result<()> {
        write_tabs(self.store.as_ref(), &self.session_key, tabs)
    }
}

impl Clone for TabSessionManager {
    fn clone(&self) -> Self {
        Self {
            session_key: self.session_key.clone(),
            store: Arc::clone(&self.store),
            policy: self.policy,
            state: Arc::clone(&self.state),
        }
    }
}

/// Deselect all but the first selected tab; returns whether one is selected.
fn keep_first_selected(tabs: &mut [Tab]) -> bool {
    let mut claimed = false;
    for tab in tabs.iter_mut().filter(|tab| tab.is_selected) {
        if claimed {
            tab.deselect();
        }
        claimed = true;
    }
    claimed
}
