//! Inputs accepted by the session manager

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::identity::{id_from_title, tab_title};
use crate::position::TabPosition;
use crate::Result;

/// Descriptor for a tab materialised at session initialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabInit {
    /// Explicit id, overriding the derived `prefix-title`
    pub id: Option<String>,
    pub id_prefix: String,
    pub name: String,
    pub kind: Option<String>,
    /// Explicit title, overriding the derived `kind/name`
    pub title: Option<String>,
    pub url: String,
    pub is_selected: bool,
    pub position: TabPosition,
    pub icon_path: Option<String>,
    pub dynamic_title: Option<String>,
    pub show_name_on_select: bool,
    pub is_alive: bool,
    pub hide_name: bool,
    pub should_remain_mounted: bool,
    pub default_url: Option<String>,
}

impl TabInit {
    pub fn new(id_prefix: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_icon_path(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    pub fn with_default_url(mut self, default_url: impl Into<String>) -> Self {
        self.default_url = Some(default_url.into());
        self
    }

    pub fn fixed(mut self, position: u32) -> Self {
        self.position = TabPosition::Fixed(position);
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn show_name_on_select(mut self) -> Self {
        self.show_name_on_select = true;
        self
    }

    pub fn alive(mut self, is_alive: bool) -> Self {
        self.is_alive = is_alive;
        self
    }

    pub fn resolved_title(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => tab_title(self.kind.as_deref(), &self.name),
        }
    }

    pub fn resolved_id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => id_from_title(&self.id_prefix, &self.resolved_title()),
        }
    }
}

/// Request to open a resource tab, or focus it if it is already open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTab {
    pub id_prefix: String,
    pub kind: String,
    pub name: String,
    pub url: String,
    pub position: TabPosition,
    pub icon_path: Option<String>,
    pub dynamic_title: Option<String>,
    pub show_name_on_select: bool,
    pub is_alive: bool,
}

impl AddTab {
    pub fn new(
        id_prefix: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            kind: kind.into(),
            name: name.into(),
            url: url.into(),
            position: TabPosition::Dynamic,
            icon_path: None,
            dynamic_title: None,
            show_name_on_select: false,
            is_alive: false,
        }
    }

    pub fn with_position(mut self, position: TabPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_icon_path(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    pub fn with_dynamic_title(mut self, dynamic_title: impl Into<String>) -> Self {
        self.dynamic_title = Some(dynamic_title.into());
        self
    }

    pub fn show_name_on_select(mut self) -> Self {
        self.show_name_on_select = true;
        self
    }

    pub fn alive(mut self, is_alive: bool) -> Self {
        self.is_alive = is_alive;
        self
    }

    /// Name, url and kind are all required.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TabError::MissingField("name"));
        }
        if self.url.is_empty() {
            return Err(TabError::MissingField("url"));
        }
        if self.kind.is_empty() {
            return Err(TabError::MissingField("kind"));
        }
        Ok(())
    }

    pub fn title(&self) -> String {
        tab_title(Some(&self.kind), &self.name)
    }

    pub fn id(&self) -> String {
        id_from_title(&self.id_prefix, &self.title())
    }
}

/// Request to move a tab to a new location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTabUrl {
    pub id: String,
    pub url: String,
    pub dynamic_title: Option<String>,
    /// Keep the query string of the tab's current url
    pub retain_search_params: bool,
}

impl UpdateTabUrl {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            dynamic_title: None,
            retain_search_params: false,
        }
    }

    pub fn with_dynamic_title(mut self, dynamic_title: impl Into<String>) -> Self {
        self.dynamic_title = Some(dynamic_title.into());
        self
    }

    pub fn retaining_search_params(mut self) -> Self {
        self.retain_search_params = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tab_requires_name_url_kind() {
        assert!(AddTab::new("rb", "pod", "nginx-0", "/pod/nginx-0").validate().is_ok());
        assert_eq!(
            AddTab::new("rb", "pod", "", "/pod").validate(),
            Err(TabError::MissingField("name"))
        );
        assert_eq!(
            AddTab::new("rb", "pod", "nginx-0", "").validate(),
            Err(TabError::MissingField("url"))
        );
        assert_eq!(
            AddTab::new("rb", "", "nginx-0", "/pod").validate(),
            Err(TabError::MissingField("kind"))
        );
    }

    #[test]
    fn test_init_id_resolution() {
        let init = TabInit::new("rb", "Pod", "/pod");
        assert_eq!(init.resolved_id(), "rb-Pod");

        let init = TabInit::new("rb", "nginx", "/deploy/nginx").with_kind("deployment");
        assert_eq!(init.resolved_title(), "deployment/nginx");
        assert_eq!(init.resolved_id(), "rb-deployment/nginx");

        let init = TabInit::new("rb", "Terminal", "/terminal").with_id("cluster_terminal-Terminal");
        assert_eq!(init.resolved_id(), "cluster_terminal-Terminal");
    }

    #[test]
    fn test_init_deserialises_with_defaults() {
        let init: TabInit =
            serde_json::from_str(r#"{"idPrefix":"rb","name":"Pod","url":"/pod","position":0}"#)
                .unwrap();
        assert_eq!(init.position, TabPosition::Fixed(0));
        assert!(!init.is_selected);
        assert!(init.kind.is_none());
    }
}
