use tabdeck_core::{AddTab, AddTabOutcome, Config, InitOptions, SessionStore, TabInit, Workspace};

fn resource_browser_tabs() -> Vec<TabInit> {
    vec![
        TabInit::new("rb", "Overview", "/resource-browser/1/overview")
            .with_id("cluster-overview")
            .fixed(0),
        TabInit::new("rb", "Pod", "/resource-browser/1/pod")
            .with_kind("k8s")
            .fixed(1)
            .selected(true),
        TabInit::new("rb", "Terminal", "/resource-browser/1/terminal")
            .with_id("cluster_terminal-Terminal")
            .with_default_url("/resource-browser/1/terminal")
            .show_name_on_select()
            .fixed(2),
    ]
}

#[test]
fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().to_path_buf());

    {
        let workspace = Workspace::open(config.clone()).unwrap();
        let session = workspace.session("/resource-browser");
        session
            .init_tabs(&resource_browser_tabs(), InitOptions::default())
            .unwrap();

        let outcome = session
            .add_tab(AddTab::new("rb", "pod", "nginx-0", "/resource-browser/1/pod/nginx-0?tab=logs"))
            .unwrap();
        assert_eq!(outcome, AddTabOutcome::Created);
        session
            .mark_tab_active_by_id("cluster_terminal-Terminal", Some("/resource-browser/1/terminal/pod-1"))
            .unwrap();
    }

    let workspace = Workspace::open(config).unwrap();
    let session = workspace.session("/resource-browser");
    let tabs = session
        .init_tabs(&resource_browser_tabs(), InitOptions::default())
        .unwrap();

    let ids: Vec<&str> = tabs.iter().map(|tab| tab.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["cluster-overview", "rb-k8s/Pod", "cluster_terminal-Terminal", "rb-pod/nginx-0"]
    );

    let terminal = session.selected_tab().unwrap();
    assert_eq!(terminal.id, "cluster_terminal-Terminal");
    assert_eq!(terminal.url, "/resource-browser/1/terminal/pod-1");
    assert!(terminal.is_alive);

    // The previously selected tab is not remembered across restarts, so
    // stopping the terminal falls back to index 1
    let next = session.stop_tab_by_identifier("cluster_terminal-Terminal").unwrap();
    assert_eq!(next, "/resource-browser/1/pod");
    let terminal = session.get_tab_by_id("cluster_terminal-Terminal").unwrap();
    assert_eq!(terminal.url, "/resource-browser/1/terminal");
    assert!(!terminal.is_alive);
}

#[test]
fn test_reinitialize_overwrites_slot() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Workspace::open(Config::new(dir.path().to_path_buf())).unwrap();
    let session = workspace.session("/resource-browser");

    session
        .init_tabs(&resource_browser_tabs(), InitOptions::default())
        .unwrap();
    session
        .add_tab(AddTab::new("rb", "pod", "nginx-0", "/resource-browser/1/pod/nginx-0"))
        .unwrap();

    let tabs = session
        .init_tabs(&resource_browser_tabs(), InitOptions::reinitialize())
        .unwrap();
    assert_eq!(tabs.len(), 3);
    assert_eq!(session.selected_tab().unwrap().id, "rb-k8s/Pod");
}

#[test]
fn test_sibling_fields_survive_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().to_path_buf());
    let store = tabdeck_core::SqliteStore::open(&config.database_path).unwrap();
    store
        .save(
            "/resource-browser",
            r#"{"key":"/resource-browser","version":1,"data":[],"lastCluster":"1"}"#,
        )
        .unwrap();
    drop(store);

    let workspace = Workspace::open(config.clone()).unwrap();
    workspace
        .session("/resource-browser")
        .init_tabs(&resource_browser_tabs(), InitOptions::default())
        .unwrap();

    let store = tabdeck_core::SqliteStore::open(&config.database_path).unwrap();
    let raw = store.load("/resource-browser").unwrap().unwrap();
    let document = tabdeck_core::SessionDocument::parse(&raw).unwrap();
    assert_eq!(document.extra["lastCluster"], "1");
    assert_eq!(document.data.len(), 3);
}
