//! Simulated `tracert`
//!
//! A trace is always [`HOP_COUNT`] hops long: the local gateway, six
//! pseudo-random intermediate routers and finally the target itself.
//! [`Traceroute`] yields the hops as a plain iterator; [`TracerouteTimer`]
//! paces the same sequence on a repeating timer that stops after the last
//! hop.

use std::time::Duration;

use rand::Rng;
use tokio::time::{interval_at, Instant, Interval};

/// Number of hops in every trace (indices `0..HOP_COUNT`)
pub const HOP_COUNT: usize = 8;

/// Address reported for the first hop
pub const GATEWAY: &str = "192.168.1.1";

/// Marker appended after the final hop
pub const TRACE_COMPLETE: &str = "Trace complete.";

const GATEWAY_RTTS_MS: [u32; 3] = [1, 1, 1];
const FINAL_RTTS_MS: [u32; 3] = [9, 8, 9];

/// One reported hop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceHop {
    /// Zero-based hop index
    pub index: usize,
    pub rtts_ms: [u32; 3],
    pub address: String,
}

impl TraceHop {
    /// Produce hop `index` of a trace towards `target`
    pub fn generate<R: Rng + ?Sized>(index: usize, target: &str, rng: &mut R) -> Self {
        let (rtts_ms, address) = if index == HOP_COUNT - 1 {
            (FINAL_RTTS_MS, target.to_string())
        } else if index == 0 {
            (GATEWAY_RTTS_MS, GATEWAY.to_string())
        } else {
            let rtts = [
                rng.gen_range(5..=14),
                rng.gen_range(5..=14),
                rng.gen_range(5..=14),
            ];
            let address = format!(
                "{}.{}.{}.{}",
                rng.gen_range(10..=12),
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
                rng.gen_range(1..=254),
            );
            (rtts, address)
        };

        Self {
            index,
            rtts_ms,
            address,
        }
    }

    pub fn is_final(&self) -> bool {
        self.index == HOP_COUNT - 1
    }

    /// Render the hop as a `tracert` output line
    pub fn line(&self) -> String {
        let [a, b, c] = self.rtts_ms;
        let mut line = format!(
            "  {}    {} ms    {} ms    {} ms  {}\n",
            self.index + 1,
            a,
            b,
            c,
            self.address
        );
        if self.is_final() {
            line.push_str(&format!("\n{TRACE_COMPLETE}\n"));
        }
        line
    }
}

/// Render the line for hop `hop` of a trace towards `target`
pub fn simulate_tracert_hop<R: Rng + ?Sized>(hop: usize, target: &str, rng: &mut R) -> String {
    TraceHop::generate(hop, target, rng).line()
}

/// Banner printed before the first hop
pub fn trace_header(target: &str) -> String {
    format!("Tracing route to {target}...\n")
}

/// Lazy sequence of the hops of one trace
pub struct Traceroute<R> {
    target: String,
    next: usize,
    rng: R,
}

impl<R: Rng> Traceroute<R> {
    pub fn new(target: impl Into<String>, rng: R) -> Self {
        Self {
            target: target.into(),
            next: 0,
            rng,
        }
    }

    /// Hops not yet emitted
    pub fn remaining(&self) -> usize {
        HOP_COUNT - self.next
    }
}

impl<R: Rng> Iterator for Traceroute<R> {
    type Item = TraceHop;

    fn next(&mut self) -> Option<TraceHop> {
        if self.next >= HOP_COUNT {
            return None;
        }
        let hop = TraceHop::generate(self.next, &self.target, &mut self.rng);
        self.next += 1;
        Some(hop)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// A [`Traceroute`] emitting one hop per timer tick
///
/// The first hop arrives one period after creation. Once the last hop has
/// been emitted the timer is dropped and `next_hop` returns `None`.
pub struct TracerouteTimer<R> {
    hops: Traceroute<R>,
    interval: Option<Interval>,
}

impl<R: Rng> TracerouteTimer<R> {
    pub fn new(hops: Traceroute<R>, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            hops,
            interval: Some(interval_at(Instant::now() + period, period)),
        }
    }

    /// Wait for the next tick and return the hop it emits
    pub async fn next_hop(&mut self) -> Option<TraceHop> {
        let interval = self.interval.as_mut()?;
        interval.tick().await;

        let hop = self.hops.next();
        if self.hops.remaining() == 0 {
            self.interval = None;
        }
        hop
    }

    /// Whether the timer is still running
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse_hop(line: &str) -> (Vec<u32>, String) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        // index, rtt, "ms", rtt, "ms", rtt, "ms", address
        let rtts = [fields[1], fields[3], fields[5]]
            .iter()
            .map(|f| f.parse().unwrap())
            .collect();
        (rtts, fields[7].to_string())
    }

    #[test]
    fn test_gateway_hop_is_fixed() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            simulate_tracert_hop(0, "host", &mut rng),
            "  1    1 ms    1 ms    1 ms  192.168.1.1\n"
        );
    }

    #[test]
    fn test_final_hop_reaches_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = simulate_tracert_hop(7, "host", &mut rng);
        assert_eq!(line, "  8    9 ms    8 ms    9 ms  host\n\nTrace complete.\n");
    }

    #[test]
    fn test_intermediate_hops_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for hop in 1..7 {
                let line = simulate_tracert_hop(hop, "host", &mut rng);
                assert!(line.starts_with(&format!("  {}    ", hop + 1)));

                let (rtts, address) = parse_hop(&line);
                assert!(rtts.iter().all(|r| (5..=14).contains(r)), "{line}");

                let octets: Vec<u32> = address.split('.').map(|o| o.parse().unwrap()).collect();
                assert_eq!(octets.len(), 4);
                assert!((10..=12).contains(&octets[0]));
                assert!(octets[1] <= 255 && octets[2] <= 255);
                assert!((1..=254).contains(&octets[3]));
            }
        }
    }

    #[test]
    fn test_same_seed_same_route() {
        let a: Vec<TraceHop> = Traceroute::new("host", StdRng::seed_from_u64(3)).collect();
        let b: Vec<TraceHop> = Traceroute::new("host", StdRng::seed_from_u64(3)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_traceroute_yields_exactly_eight() {
        let mut trace = Traceroute::new("example.com", StdRng::seed_from_u64(0));
        assert_eq!(trace.size_hint(), (HOP_COUNT, Some(HOP_COUNT)));

        let hops: Vec<TraceHop> = trace.by_ref().collect();
        assert_eq!(hops.len(), HOP_COUNT);
        assert_eq!(hops[0].address, GATEWAY);
        assert!(hops[7].is_final());
        assert_eq!(hops[7].address, "example.com");
        assert!(trace.next().is_none());
    }

    #[tokio::test]
    async fn test_timer_stops_after_last_hop() {
        let trace = Traceroute::new("example.com", StdRng::seed_from_u64(0));
        let mut timer = TracerouteTimer::new(trace, Duration::from_millis(1));

        let mut count = 0;
        while let Some(hop) = timer.next_hop().await {
            assert_eq!(hop.index, count);
            count += 1;
        }

        assert_eq!(count, HOP_COUNT);
        assert!(!timer.is_running());
        assert!(timer.next_hop().await.is_none());
    }
}
