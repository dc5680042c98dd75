// src/middleware/navigator.rs
use std::sync::Mutex;

use log::info;

/// Full-page navigation, the only way controllers leave their screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Remembers every navigation in order; headless hosts read it back.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    visits: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn history(&self) -> Vec<String> {
        self.visits.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn current(&self) -> Option<String> {
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }
}
