//! Tab identity derivation

/// Display title of a resource: `kind/name`, or just `name` without a kind.
pub fn tab_title(kind: Option<&str>, name: &str) -> String {
    match kind {
        Some(kind) if !kind.is_empty() => format!("{}/{}", kind, name),
        _ => name.to_string(),
    }
}

/// Stable tab id for a resource.
pub fn tab_id(id_prefix: &str, name: &str, kind: Option<&str>) -> String {
    id_from_title(id_prefix, &tab_title(kind, name))
}

pub(crate) fn id_from_title(id_prefix: &str, title: &str) -> String {
    format!("{}-{}", id_prefix, title)
}
