//! Simulated `ping`
//!
//! Output is fully deterministic: four replies with fixed round-trip times.

use std::fmt::Write;

/// Round-trip times of the four echo replies, in milliseconds
pub const REPLY_TIMES_MS: [u32; 4] = [10, 11, 9, 12];

const TTL: u32 = 128;
const PAYLOAD_BYTES: u32 = 32;

/// Round-trip statistics over the reply times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingStats {
    pub sent: usize,
    pub received: usize,
    pub min_ms: u32,
    pub max_ms: u32,
    /// Integer average, truncated like the Windows tool
    pub avg_ms: u32,
}

impl PingStats {
    pub fn from_times(times: &[u32]) -> Self {
        let min_ms = times.iter().copied().min().unwrap_or(0);
        let max_ms = times.iter().copied().max().unwrap_or(0);
        let avg_ms = if times.is_empty() {
            0
        } else {
            times.iter().sum::<u32>() / times.len() as u32
        };

        Self {
            sent: times.len(),
            received: times.len(),
            min_ms,
            max_ms,
            avg_ms,
        }
    }

    pub fn loss_percent(&self) -> usize {
        if self.sent == 0 {
            return 0;
        }
        (self.sent - self.received) * 100 / self.sent
    }
}

/// Render the output of pinging `target`
pub fn simulate_ping(target: &str) -> String {
    let mut out = format!("\nPinging {target} with {PAYLOAD_BYTES} bytes of data:\n");

    for time in REPLY_TIMES_MS {
        let _ = writeln!(
            out,
            "Reply from {target}: bytes={PAYLOAD_BYTES} time={time}ms TTL={TTL}"
        );
    }

    let stats = PingStats::from_times(&REPLY_TIMES_MS);
    let _ = write!(
        out,
        "\nPing statistics for {target}:\n\
         \x20   Packets: Sent = {}, Received = {}, Lost = {} ({}% loss),\n\
         Approximate round trip times in milli-seconds:\n\
         \x20   Minimum = {}ms, Maximum = {}ms, Average = {}ms\n",
        stats.sent,
        stats.received,
        stats.sent - stats.received,
        stats.loss_percent(),
        stats.min_ms,
        stats.max_ms,
        stats.avg_ms,
    );

    out
}
