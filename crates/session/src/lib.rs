mod models;
mod session;
mod guard;
mod menu;
mod errors;

pub use models::{MenuItem, RouteDecision, Session, SessionState};
pub use menu::{account_menu, menu_for};
pub use errors::SessionError;
