//! Clock and CPU/RAM sampling with a display cache

use crate::config::MonitorConfig;
use crate::constants::monitor::{CLOCK_FORMAT, CLOCK_PLACEHOLDER};
use crate::queue::{CommandSink, ControlMessage};
use crate::utils::{sleep_while_running, AppError, Result};
use chrono::Local;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use sysinfo::{MemoryRefreshKind, System};

/// CPU and RAM utilisation in percent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResourceUsage {
    pub cpu_percent: f32,
    pub ram_percent: f32,
}

/// One sampler tick. `resources` is `None` on throttled ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSample {
    pub timestamp: String,
    pub resources: Option<ResourceUsage>,
}

impl MonitorSample {
    pub fn now(resources: Option<ResourceUsage>) -> Self {
        Self {
            timestamp: Local::now().format(CLOCK_FORMAT).to_string(),
            resources,
        }
    }
}

/// Source of CPU/RAM readings
pub trait ResourceProbe: Send {
    fn sample(&mut self) -> Result<ResourceUsage>;
}

/// `sysinfo`-backed probe
pub struct SysinfoProbe {
    system: System,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let mut system = System::new();
        // 第一次 CPU 采样没有参考值，先刷一遍
        system.refresh_cpu_usage();
        system.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        Self { system }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SysinfoProbe {
    fn sample(&mut self) -> Result<ResourceUsage> {
        self.system.refresh_cpu_usage();
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());

        let total = self.system.total_memory();
        if total == 0 {
            return Err(AppError::monitor("total memory reported as zero"));
        }
        let used = total.saturating_sub(self.system.available_memory());

        Ok(ResourceUsage {
            cpu_percent: self.system.global_cpu_usage().clamp(0.0, 100.0),
            ram_percent: (used as f32 / total as f32 * 100.0).clamp(0.0, 100.0),
        })
    }
}

/// Last-known values and rendered text.
///
/// While collapsed every reading is cached so that expanding shows a value
/// straight away. While expanded the resource text only changes when a
/// reading moved by more than the hysteresis threshold.
#[derive(Debug, Clone)]
pub struct MonitorCache {
    hysteresis: f32,
    clock: String,
    cpu: f32,
    ram: f32,
}

impl MonitorCache {
    pub fn new(hysteresis: f32) -> Self {
        Self {
            hysteresis,
            clock: CLOCK_PLACEHOLDER.to_string(),
            cpu: 0.0,
            ram: 0.0,
        }
    }

    /// Fold a sample in. Returns whether the expanded display needs a redraw.
    pub fn apply(&mut self, sample: &MonitorSample, expanded: bool) -> bool {
        if !expanded {
            self.clock.clone_from(&sample.timestamp);
            if let Some(usage) = sample.resources {
                self.cpu = usage.cpu_percent;
                self.ram = usage.ram_percent;
            }
            return false;
        }

        let mut changed = false;
        if sample.timestamp != self.clock {
            self.clock.clone_from(&sample.timestamp);
            changed = true;
        }

        if let Some(usage) = sample.resources {
            if (usage.cpu_percent - self.cpu).abs() > self.hysteresis
                || (usage.ram_percent - self.ram).abs() > self.hysteresis
            {
                self.cpu = usage.cpu_percent;
                self.ram = usage.ram_percent;
                changed = true;
            }
        }
        changed
    }

    pub fn clock_text(&self) -> &str {
        &self.clock
    }

    pub fn resource_text(&self) -> String {
        format!("CPU: {:.0}% | RAM: {:.0}%", self.cpu, self.ram)
    }

    pub fn cpu(&self) -> f32 {
        self.cpu
    }

    pub fn ram(&self) -> f32 {
        self.ram
    }
}

impl Default for MonitorCache {
    fn default() -> Self {
        Self::new(crate::constants::monitor::HYSTERESIS_PERCENT)
    }
}

/// Spawn the sampler: one message per clock tick, resources every Nth tick
pub fn spawn_sampler<P>(
    config: MonitorConfig,
    mut probe: P,
    sink: CommandSink,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<()>>
where
    P: ResourceProbe + 'static,
{
    let interval = Duration::from_millis(config.clock_interval_ms);
    let every = config.resource_every_ticks.max(1) as u64;

    thread::Builder::new()
        .name("monitor".to_string())
        .spawn(move || {
            info!("Starting monitor thread");
            let mut tick: u64 = 0;
            while running.load(Ordering::Relaxed) {
                let resources = if tick % every == 0 {
                    match probe.sample() {
                        Ok(usage) => Some(usage),
                        Err(e) => {
                            warn!("Resource sampling failed: {}", e);
                            None
                        }
                    }
                } else {
                    None
                };

                let sample = MonitorSample::now(resources);
                debug!("Monitor tick {}: {:?}", tick, sample);
                if !sink.send(ControlMessage::Monitor(sample)) {
                    break;
                }

                tick = tick.wrapping_add(1);
                if !sleep_while_running(&running, interval) {
                    break;
                }
            }
            info!("Monitor thread exiting");
        })
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(clock: &str, cpu: f32, ram: f32) -> MonitorSample {
        MonitorSample {
            timestamp: clock.to_string(),
            resources: Some(ResourceUsage {
                cpu_percent: cpu,
                ram_percent: ram,
            }),
        }
    }

    #[test]
    fn test_hysteresis_suppresses_small_changes() {
        let mut cache = MonitorCache::new(1.0);
        assert!(cache.apply(&sample("10:00:00", 42.0, 50.0), true));
        let text = cache.resource_text();

        assert!(!cache.apply(&sample("10:00:00", 42.5, 50.0), true));
        assert_eq!(cache.resource_text(), text);
        assert_eq!(cache.cpu(), 42.0);
    }

    #[test]
    fn test_hysteresis_lets_large_changes_through() {
        let mut cache = MonitorCache::new(1.0);
        cache.apply(&sample("10:00:00", 42.0, 50.0), true);
        assert!(cache.apply(&sample("10:00:00", 44.0, 50.0), true));
        assert_eq!(cache.resource_text(), "CPU: 44% | RAM: 50%");
    }

    #[test]
    fn test_collapsed_caches_without_redraw() {
        let mut cache = MonitorCache::new(1.0);
        assert_eq!(cache.clock_text(), "00:00:00");
        assert!(!cache.apply(&sample("11:22:33", 10.2, 60.0), false));
        assert_eq!(cache.clock_text(), "11:22:33");
        assert_eq!(cache.resource_text(), "CPU: 10% | RAM: 60%");
    }

    #[test]
    fn test_clock_tick_without_resources() {
        let mut cache = MonitorCache::new(1.0);
        cache.apply(&sample("10:00:00", 5.0, 5.0), true);
        let tick = MonitorSample {
            timestamp: "10:00:01".to_string(),
            resources: None,
        };
        assert!(cache.apply(&tick, true));
        assert_eq!(cache.clock_text(), "10:00:01");
        assert_eq!(cache.cpu(), 5.0);
    }

    struct CountingProbe(u32);

    impl ResourceProbe for CountingProbe {
        fn sample(&mut self) -> Result<ResourceUsage> {
            self.0 += 1;
            Ok(ResourceUsage {
                cpu_percent: self.0 as f32,
                ram_percent: 1.0,
            })
        }
    }

    #[test]
    fn test_sampler_throttles_resources() {
        let queue = crate::queue::CommandQueue::new();
        let running = Arc::new(AtomicBool::new(true));
        let config = MonitorConfig {
            clock_interval_ms: 10,
            resource_every_ticks: 3,
            hysteresis_percent: 1.0,
        };
        let handle =
            spawn_sampler(config, CountingProbe(0), queue.sink(), Arc::clone(&running)).unwrap();

        let mut samples = Vec::new();
        while samples.len() < 6 {
            match queue.receiver().recv_timeout(Duration::from_secs(2)) {
                Ok(ControlMessage::Monitor(s)) => samples.push(s),
                other => panic!("unexpected {:?}", other),
            }
        }
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        let with_resources: Vec<bool> = samples.iter().map(|s| s.resources.is_some()).collect();
        assert_eq!(with_resources, vec![true, false, false, true, false, false]);
    }
}
