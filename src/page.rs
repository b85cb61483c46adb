//! Window-level seam: location, viewport and the Notification API.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Browser notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    /// The user has not decided yet.
    Default,
    Granted,
    Denied,
}

/// Operations on the hosting window.
pub trait Page: Send + Sync {
    /// Reload the current page.
    fn reload(&self);

    /// Navigate to `path` (full page transition).
    fn navigate(&self, path: &str);

    /// `window.innerHeight` in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Current permission, or `None` if the Notification API is unavailable.
    fn notification_permission(&self) -> Option<NotificationPermission>;

    /// Prompt the user for notification permission.
    fn request_notification_permission(&self);
}

#[derive(Debug)]
struct PageState {
    location: String,
    history: Vec<String>,
    reloads: usize,
    viewport_height: f64,
    permission: Option<NotificationPermission>,
    permission_requests: usize,
}

/// Recording [`Page`] for the headless harness and tests.
#[derive(Debug)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl MemoryPage {
    /// A page at `/` with the given viewport height and no Notification API.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            state: Mutex::new(PageState {
                location: "/".to_string(),
                history: Vec::new(),
                reloads: 0,
                viewport_height,
                permission: None,
                permission_requests: 0,
            }),
        }
    }

    /// Expose a Notification API in the given state.
    #[must_use]
    pub fn with_notifications(self, permission: NotificationPermission) -> Self {
        self.state().permission = Some(permission);
        self
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.state().location.clone()
    }

    /// Every path navigated to, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.state().reloads
    }

    #[must_use]
    pub fn permission_requests(&self) -> usize {
        self.state().permission_requests
    }
}

impl Page for MemoryPage {
    fn reload(&self) {
        self.state().reloads += 1;
    }

    fn navigate(&self, path: &str) {
        let mut state = self.state();
        state.location = path.to_string();
        state.history.push(path.to_string());
    }

    fn viewport_height(&self) -> f64 {
        self.state().viewport_height
    }

    fn notification_permission(&self) -> Option<NotificationPermission> {
        self.state().permission
    }

    fn request_notification_permission(&self) {
        self.state().permission_requests += 1;
    }
}
