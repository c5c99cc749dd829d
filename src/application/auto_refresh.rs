// Auto-refresh controller - Shared on/off switch with change notification
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshSettings {
    pub enabled: bool,
    pub interval_secs: Option<u64>,
}

impl RefreshSettings {
    /// Unset or zero intervals refresh every second
    pub fn period(&self) -> Duration {
        let secs = self.interval_secs.filter(|s| *s > 0).unwrap_or(1);
        Duration::from_secs(secs)
    }
}

/// Cloneable handle; every clone observes and drives the same settings
#[derive(Clone)]
pub struct AutoRefresh {
    settings: Arc<watch::Sender<RefreshSettings>>,
}

impl AutoRefresh {
    pub fn new(settings: RefreshSettings) -> Self {
        let (tx, _) = watch::channel(settings);
        Self {
            settings: Arc::new(tx),
        }
    }

    pub fn settings(&self) -> RefreshSettings {
        *self.settings.borrow()
    }

    pub fn is_enabled(&self) -> bool {
        self.settings().enabled
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshSettings> {
        self.settings.subscribe()
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Flip the switch and return the new state
    pub fn toggle(&self) -> bool {
        let mut enabled = false;
        self.settings.send_modify(|s| {
            s.enabled = !s.enabled;
            enabled = s.enabled;
        });
        tracing::info!(enabled, "auto-refresh toggled");
        enabled
    }

    pub fn set_interval(&self, interval_secs: Option<u64>) {
        self.settings.send_if_modified(|s| {
            let changed = s.interval_secs != interval_secs;
            s.interval_secs = interval_secs;
            changed
        });
    }

    fn set_enabled(&self, enabled: bool) {
        let changed = self.settings.send_if_modified(|s| {
            let changed = s.enabled != enabled;
            s.enabled = enabled;
            changed
        });
        if changed {
            tracing::info!(enabled, "auto-refresh switched");
        }
    }
}
