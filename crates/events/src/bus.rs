use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Arc::new(Self { silent_mode, sender })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        if !self.silent_mode {
            Self::render(&event);
        }
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    fn render(event: &AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("{} {}", "Quill admin".white().bold(), env!("CARGO_PKG_VERSION").cyan());
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { api_url } => {
                println!("  {} API {}", "✓".green(), api_url.cyan());
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // Session
            AppEvent::SessionRestored { username } => {
                println!("  {} Signed in as {}", "✓".green(), username.cyan());
            }
            AppEvent::SessionAnonymous => {
                // Silent
            }
            AppEvent::LoggedIn { username } => {
                println!("  {} Welcome, {}", "✓".green(), username.cyan());
            }
            AppEvent::LoggedOut => {
                println!("  {} Signed out", "-".red());
            }
            AppEvent::SessionExpired { .. } => {
                println!("  {} Session expired, please sign in again", "⚠".yellow());
            }
            AppEvent::ProfileUpdated { username } => {
                println!("  {} Profile updated for {}", "✓".green(), username.cyan());
            }
            AppEvent::PasswordChanged => {
                println!("  {} Password changed", "✓".green());
            }

            // HTTP notifications
            AppEvent::Forbidden { .. } => {
                println!("  {} Permission denied", "✗".red());
            }
            AppEvent::NotFound { path } => {
                println!("  {} Resource not found: {}", "✗".red(), path.dimmed());
            }
            AppEvent::ServerError { status, .. } => {
                println!("  {} Server error ({})", "✗".red(), status);
            }
            AppEvent::RequestFailed { message, .. } => {
                println!("  {} {}", "✗".red(), message);
            }
            AppEvent::ConnectionFailed { .. } => {
                println!("  {} Connection failed, check your network", "✗".red());
            }

            // Resources
            AppEvent::UploadCompleted { name, url } => {
                println!("  {} {} → {}", "↑".green(), name.cyan(), url.blue());
            }
            AppEvent::UploadFailed { name, error } => {
                println!("  {} {}: {}", "✗".red(), name.cyan(), error);
            }
            AppEvent::FileUpdated { id } => {
                println!("  {} Updated file {}", "↻".blue(), id.to_string().cyan());
            }
            AppEvent::FileDeleted { id } => {
                println!("  {} Deleted file {}", "-".red(), id.to_string().cyan());
            }
            AppEvent::CacheInvalidated { resource } => {
                tracing::debug!("Cache invalidated for {}", resource);
            }

            // Posts and categories
            AppEvent::EntrySaved { resource, id } => {
                println!("  {} Saved {} {}", "✓".green(), resource, id.to_string().cyan());
            }
            AppEvent::EntryDeleted { resource, id } => {
                println!("  {} Deleted {} {}", "-".red(), resource, id.to_string().cyan());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_emitted_events() {
        let bus = EventBus::new(true);
        let mut rx = bus.subscribe();

        bus.emit(AppEvent::FileDeleted { id: 7 });

        assert_eq!(rx.try_recv().unwrap(), AppEvent::FileDeleted { id: 7 });
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(true);
        bus.emit(AppEvent::LoggedOut);
    }
}
