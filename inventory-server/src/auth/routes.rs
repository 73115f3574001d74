//! Route Classifier
//!
//! Maps concrete dashboard paths to the (module, action) pair the permission
//! table is consulted with. A path with no mapping is an explicit
//! [`Classification::Unmapped`] outcome: callers deny it, and the miss is
//! logged as a configuration gap. Never fail-open.

use super::permissions::{Action, Module};

/// Outcome of classifying a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Path resolved to a protected module and the action it implies
    Matched { module: Module, action: Action },
    /// No route-table entry for the normalized path; always denied
    Unmapped,
}

impl Classification {
    pub fn is_matched(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }
}

/// Static path → module table, keyed by normalized list paths
const MODULE_ROUTES: &[(&str, Module)] = &[
    ("/dashboard", Module::Dashboard),
    ("/dashboard/profile", Module::Profile),
    ("/dashboard/products", Module::Products),
    ("/dashboard/categories", Module::Categories),
    ("/dashboard/providers", Module::Providers),
    ("/dashboard/pharmacy", Module::Pharmacy),
    ("/dashboard/pharmacy/dispense", Module::Pharmacy),
    ("/dashboard/users", Module::Users),
];

/// Static path → action table for paths whose action is not `view`
const ACTION_ROUTES: &[(&str, Action)] = &[
    ("/dashboard/products/new", Action::Create),
    ("/dashboard/categories/new", Action::Create),
    ("/dashboard/providers/new", Action::Create),
    ("/dashboard/users/new", Action::Create),
    ("/dashboard/pharmacy/dispense", Action::Create),
];

/// Classify a dashboard path into a (module, action) pair
///
/// Edit routes carry a record id (`/dashboard/products/abc-123/edit`); the id
/// segment is stripped before lookup because edit permission is granted per
/// module, not per record. A module match without an explicit action entry
/// defaults to `view`.
pub fn classify(path: &str) -> Classification {
    let path = strip_trailing_slash(path);

    // Dynamic edit routes collapse to the module's list path
    if let Some(prefix) = path.strip_suffix("/edit") {
        // `/edit` directly on a mapped path carries no record id; that is a
        // malformed link, not an edit route, and must stay unmapped rather
        // than have its last segment mistaken for an id.
        if module_for(prefix).is_some() {
            return unmapped(path);
        }
        return match normalize_edit_prefix(prefix).and_then(module_for) {
            Some(module) => Classification::Matched {
                module,
                action: Action::Edit,
            },
            None => unmapped(path),
        };
    }

    // `/new` routes classify against their parent list path
    if let Some(list_path) = path.strip_suffix("/new") {
        return match module_for(list_path) {
            Some(module) => Classification::Matched {
                module,
                action: Action::Create,
            },
            None => unmapped(path),
        };
    }

    match module_for(path) {
        Some(module) => Classification::Matched {
            module,
            action: action_for(path),
        },
        None => unmapped(path),
    }
}

/// Infer the action from path shape alone
///
/// Fallback usable without the static tables: `/new` means create, `/edit`
/// anywhere means edit, everything else is view.
pub fn infer_action(path: &str) -> Action {
    let path = strip_trailing_slash(path);
    if path.ends_with("/new") {
        Action::Create
    } else if path.contains("/edit") {
        Action::Edit
    } else {
        Action::View
    }
}

/// Collapse `/<list-path>/<id>` to its list path
///
/// `prefix` is an edit route with the `/edit` suffix already stripped. The id
/// is the last remaining segment; it must be non-empty.
fn normalize_edit_prefix(prefix: &str) -> Option<&str> {
    let (list_path, id) = prefix.rsplit_once('/')?;
    if id.is_empty() || list_path.is_empty() {
        return None;
    }
    Some(list_path)
}

fn module_for(path: &str) -> Option<Module> {
    MODULE_ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, m)| *m)
}

fn action_for(path: &str) -> Action {
    ACTION_ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, a)| *a)
        .unwrap_or(Action::View)
}

fn strip_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn unmapped(path: &str) -> Classification {
    // Configuration gap: a protected page exists that the route table does
    // not know about. Surface it for operators; the caller still denies.
    tracing::warn!(target: "security", path = %path, "unmapped route, denying by default");
    Classification::Unmapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_paths_classify_as_view() {
        assert_eq!(
            classify("/dashboard/products"),
            Classification::Matched {
                module: Module::Products,
                action: Action::View
            }
        );
        assert_eq!(
            classify("/dashboard"),
            Classification::Matched {
                module: Module::Dashboard,
                action: Action::View
            }
        );
    }

    #[test]
    fn test_new_paths_classify_as_create() {
        assert_eq!(
            classify("/dashboard/users/new"),
            Classification::Matched {
                module: Module::Users,
                action: Action::Create
            }
        );
    }

    #[test]
    fn test_edit_paths_normalize_away_the_id() {
        let expected = Classification::Matched {
            module: Module::Products,
            action: Action::Edit,
        };
        assert_eq!(classify("/dashboard/products/abc-123/edit"), expected);
        assert_eq!(classify("/dashboard/products/42/edit"), expected);
        assert_eq!(
            classify("/dashboard/products/550e8400-e29b-41d4-a716-446655440000/edit"),
            expected
        );
    }

    #[test]
    fn test_dispense_path_is_a_create_on_pharmacy() {
        assert_eq!(
            classify("/dashboard/pharmacy/dispense"),
            Classification::Matched {
                module: Module::Pharmacy,
                action: Action::Create
            }
        );
    }

    #[test]
    fn test_unknown_paths_are_unmapped() {
        assert_eq!(classify("/dashboard/reports"), Classification::Unmapped);
        assert_eq!(classify("/totally/elsewhere"), Classification::Unmapped);
        assert_eq!(classify("/dashboard/reports/7/edit"), Classification::Unmapped);
        assert_eq!(classify("/edit"), Classification::Unmapped);
    }

    #[test]
    fn test_edit_without_an_id_never_borrows_a_mapped_segment() {
        // "profile" must not be mistaken for a record id under /dashboard
        assert_eq!(classify("/dashboard/profile/edit"), Classification::Unmapped);
        assert_eq!(classify("/dashboard/products/edit"), Classification::Unmapped);
        assert_eq!(
            classify("/dashboard/pharmacy/dispense/edit"),
            Classification::Unmapped
        );
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        assert_eq!(
            classify("/dashboard/categories/"),
            Classification::Matched {
                module: Module::Categories,
                action: Action::View
            }
        );
    }

    #[test]
    fn test_infer_action_from_shape() {
        assert_eq!(infer_action("/dashboard/products/new"), Action::Create);
        assert_eq!(infer_action("/dashboard/products/9/edit"), Action::Edit);
        assert_eq!(infer_action("/dashboard/products"), Action::View);
    }
}
