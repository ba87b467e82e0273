use super::models::MenuItem;
use quill_models::Role;

const DASHBOARD: MenuItem = MenuItem { key: "/admin/dashboard", label: "Dashboard" };
const FILES: MenuItem = MenuItem { key: "/admin/files", label: "Files" };
const ADVERTISEMENT: MenuItem = MenuItem { key: "/admin/advertisement", label: "Advertisement" };

const BASE_ITEMS: [MenuItem; 5] = [
    MenuItem { key: "/admin/posts", label: "Posts" },
    MenuItem { key: "/admin/categories", label: "Categories" },
    MenuItem { key: "/admin/resources", label: "Resources" },
    MenuItem { key: "/admin/resume", label: "Resume" },
    MenuItem { key: "/admin/works", label: "Works" },
];

/// Sidebar entries visible to a role
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    match role {
        Role::Admin => [DASHBOARD, FILES].into_iter().chain(BASE_ITEMS).collect(),
        Role::User => BASE_ITEMS.into_iter().chain([ADVERTISEMENT]).collect(),
    }
}

pub fn account_menu() -> Vec<MenuItem> {
    vec![
        MenuItem { key: "/admin/profile", label: "Profile" },
        MenuItem { key: "logout", label: "Sign out" },
    ]
}
