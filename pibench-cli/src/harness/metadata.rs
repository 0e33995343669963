//! System Metadata Collection
//!
//! Collects the OS, architecture, CPU model and core count for report
//! metadata. The CPU model is read from `/proc/cpuinfo` and degrades to
//! "Unknown" on other platforms.

use chrono::Utc;
use pibench_report::{ReportMeta, SystemInfo};

/// Build report metadata including system info
pub fn build_report_meta(total_duration_ms: f64) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        total_duration_ms,
    }
}

/// CPU model from the first `model name` entry of /proc/cpuinfo
#[cfg(target_os = "linux")]
fn get_cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "model name").then(|| value.trim().to_string())
    })
}

#[cfg(not(target_os = "linux"))]
fn get_cpu_model() -> Option<String> {
    None
}

/// Get number of available CPU cores
pub fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_has_system_info() {
        let meta = build_report_meta(12.5);
        assert!(!meta.system.os.is_empty());
        assert!(!meta.system.cpu.is_empty());
        assert!(meta.system.cpu_cores >= 1);
        assert_eq!(meta.total_duration_ms, 12.5);
    }
}
