#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Process-level run statistics (elapsed wall time, resident memory).
/// Disabled instances are free no-ops so the engine can always carry one.
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid: sysinfo::get_current_pid().ok(),
            start: Instant::now(),
            enabled,
        }
    }

    fn memory_mb(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        system.process(pid).map(|p| p.memory() / 1024 / 1024)
    }

    pub fn log_stats(&self, phase: &str) {
        if !self.enabled {
            return;
        }
        match self.memory_mb() {
            Some(memory_mb) => tracing::info!(
                phase,
                memory_mb,
                elapsed = ?self.start.elapsed(),
                "run stats"
            ),
            None => tracing::info!(phase, elapsed = ?self.start.elapsed(), "run stats"),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op twin for builds without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
