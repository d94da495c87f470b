//! Utility modules

pub mod error;

pub use error::{AppError, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// 分片睡眠：停止标志翻转后最多 50ms 内返回
///
/// Returns `false` when the flag was cleared before the full duration elapsed.
pub fn sleep_while_running(running: &AtomicBool, duration: Duration) -> bool {
    const SLICE: Duration = Duration::from_millis(50);

    let deadline = Instant::now() + duration;
    loop {
        if !running.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(SLICE.min(deadline - now));
    }
}
