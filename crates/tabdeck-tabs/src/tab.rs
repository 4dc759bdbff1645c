//! Tab data structure
//!
//! Mutations happen in place; a tab only leaves its session through
//! explicit removal. Stopping or flagging the resource as deleted keeps
//! the record around.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::position::TabPosition;
use crate::request::{AddTab, TabInit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Derived from id prefix and title, unique within a session
    pub id: String,
    /// Name of the underlying resource
    pub name: String,
    /// `kind/name` or `name`
    pub title: String,
    /// Current location, changes as the user navigates inside the tab
    pub url: String,
    #[serde(default)]
    pub is_selected: bool,
    /// The resource was deleted out-of-band
    #[serde(default)]
    pub is_deleted: bool,
    /// For `show_name_on_select` tabs: selected at least once since last stop
    #[serde(default)]
    pub is_alive: bool,
    #[serde(default)]
    pub position: TabPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub dynamic_title: String,
    #[serde(default)]
    pub show_name_on_select: bool,
    #[serde(default)]
    pub hide_name: bool,
    #[serde(default)]
    pub should_remain_mounted: bool,
    /// Location a stopped tab rewinds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub last_sync_moment: DateTime<Utc>,
    /// Changes whenever the rendered instance must be remounted
    #[serde(default)]
    pub component_key: String,
}

impl Tab {
    pub fn from_init(init: &TabInit) -> Self {
        let id = init.resolved_id();
        let component_key = component_key(&id);

        Self {
            title: init.resolved_title(),
            id,
            name: init.name.clone(),
            url: init.url.clone(),
            is_selected: init.is_selected,
            is_deleted: false,
            is_alive: init.is_alive,
            position: init.position,
            icon_path: init.icon_path.clone(),
            dynamic_title: init.dynamic_title.clone().unwrap_or_default(),
            show_name_on_select: init.show_name_on_select,
            hide_name: init.hide_name,
            should_remain_mounted: init.should_remain_mounted,
            default_url: init.default_url.clone(),
            last_sync_moment: Utc::now(),
            component_key,
        }
    }

    /// A freshly opened tab is always the selected one.
    pub fn from_request(request: &AddTab) -> Self {
        let id = request.id();
        let component_key = component_key(&id);

        Self {
            id,
            name: request.name.clone(),
            title: request.title(),
            url: request.url.clone(),
            is_selected: true,
            is_deleted: false,
            is_alive: request.is_alive,
            position: request.position,
            icon_path: request.icon_path.clone(),
            dynamic_title: request.dynamic_title.clone().unwrap_or_default(),
            show_name_on_select: request.show_name_on_select,
            hide_name: false,
            should_remain_mounted: false,
            default_url: None,
            last_sync_moment: Utc::now(),
            component_key,
        }
    }

    /// Select the tab. The first selection confirms a `show_name_on_select` tab.
    pub fn select(&mut self) {
        self.is_selected = true;
        if self.show_name_on_select {
            self.is_alive = true;
        }
    }

    pub fn deselect(&mut self) {
        self.is_selected = false;
    }

    /// Deactivate without removing; rewinds to `default_url` when set.
    pub fn stop(&mut self) {
        tracing::debug!(tab_id = %self.id, rewind = self.default_url.is_some(), "Stopping tab");

        self.is_selected = false;
        self.is_alive = false;
        if let Some(default_url) = &self.default_url {
            self.url = default_url.clone();
        }
    }

    pub fn mark_deleted(&mut self) {
        tracing::debug!(tab_id = %self.id, "Tab resource deleted");
        self.is_deleted = true;
    }

    pub fn navigate(&mut self, url: String) {
        self.url = url;
    }

    /// Navigate to `path`, carrying over the current query string.
    pub fn navigate_retaining_query(&mut self, path: &str) {
        let query = self
            .query()
            .filter(|query| !query.is_empty())
            .map(str::to_string);

        self.url = match query {
            Some(query) => {
                let base = path.split_once('?').map_or(path, |(base, _)| base);
                format!("{}?{}", base, query)
            }
            None => path.to_string(),
        };
    }

    /// Text after the first `?` of the url.
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }

    pub fn remount(&mut self) {
        self.component_key = component_key(&self.id);
    }

    pub fn touch_sync(&mut self) {
        self.last_sync_moment = Utc::now();
    }

    pub fn matches_id_ignore_case(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Label to render on the tab strip, `None` while the name is hidden.
    pub fn display_title(&self) -> Option<&str> {
        let name_visible = !self.show_name_on_select || self.is_alive || self.is_selected;
        if !name_visible || self.hide_name {
            return None;
        }

        if self.dynamic_title.is_empty() {
            Some(&self.title)
        } else {
            Some(&self.dynamic_title)
        }
    }
}

fn component_key(id: &str) -> String {
    format!(
        "{}-{}",
        id,
        Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
    )
}
