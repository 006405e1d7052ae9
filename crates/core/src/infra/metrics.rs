use serde::Serialize;
use std::sync::Mutex;

/// ローカルメトリクス収集器
pub struct Metrics {
    counters: Mutex<MetricsCounters>,
    latencies: Mutex<Vec<LatencyRecord>>,
}

#[derive(Debug, Default)]
struct MetricsCounters {
    requests_submitted: u64,
    requests_succeeded: u64,
    results_delivered: u64,
    errors_transport: u64,
    errors_malformed: u64,
    errors_unknown: u64,
    errors_invalid_state: u64,
    errors_clipboard: u64,
    errors_internal: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyRecord {
    pub phase: String,
    pub duration_ms: u64,
    pub timestamp: String,
}

/// メトリクスサマリー（CLI に返す用）
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub requests_submitted: u64,
    pub requests_succeeded: u64,
    pub results_delivered: u64,
    pub error_counts: ErrorCounts,
    pub avg_latency_ms: AvgLatency,
    pub recent_latencies: Vec<LatencyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorCounts {
    pub transport: u64,
    pub malformed_response: u64,
    pub unknown: u64,
    pub invalid_state: u64,
    pub clipboard: u64,
    pub internal: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvgLatency {
    pub process: Option<f64>,
    pub deliver: Option<f64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(MetricsCounters::default()),
            latencies: Mutex::new(Vec::new()),
        }
    }

    pub fn inc_requests_submitted(&self) {
        self.counters.lock().unwrap().requests_submitted += 1;
    }

    pub fn inc_requests_succeeded(&self) {
        self.counters.lock().unwrap().requests_succeeded += 1;
    }

    pub fn inc_results_delivered(&self) {
        self.counters.lock().unwrap().results_delivered += 1;
    }

    pub fn inc_error(&self, code: &str) {
        let mut c = self.counters.lock().unwrap();
        match code {
            "E_TRANSPORT" => c.errors_transport += 1,
            "E_MALFORMED_RESPONSE" => c.errors_malformed += 1,
            "E_UNKNOWN" => c.errors_unknown += 1,
            "E_INVALID_STATE" => c.errors_invalid_state += 1,
            "E_CLIPBOARD" => c.errors_clipboard += 1,
            _ => c.errors_internal += 1,
        }
    }

    pub fn record_latency(&self, phase: &str, duration_ms: u64) {
        let record = LatencyRecord {
            phase: phase.to_string(),
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let mut latencies = self.latencies.lock().unwrap();
        latencies.push(record);
        // 最新1000件のみ保持
        if latencies.len() > 1000 {
            let excess = latencies.len() - 1000;
            latencies.drain(0..excess);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let c = self.counters.lock().unwrap();
        let latencies = self.latencies.lock().unwrap();

        let avg = |phase: &str| -> Option<f64> {
            let vals: Vec<f64> = latencies
                .iter()
                .filter(|r| r.phase == phase)
                .map(|r| r.duration_ms as f64)
                .collect();
            if vals.is_empty() {
                None
            } else {
                Some(vals.iter().sum::<f64>() / vals.len() as f64)
            }
        };

        let recent: Vec<LatencyRecord> = latencies.iter().rev().take(20).cloned().collect();

        MetricsSummary {
            requests_submitted: c.requests_submitted,
            requests_succeeded: c.requests_succeeded,
            results_delivered: c.results_delivered,
            error_counts: ErrorCounts {
                transport: c.errors_transport,
                malformed_response: c.errors_malformed,
                unknown: c.errors_unknown,
                invalid_state: c.errors_invalid_state,
                clipboard: c.errors_clipboard,
                internal: c.errors_internal,
            },
            avg_latency_ms: AvgLatency {
                process: avg("process"),
                deliver: avg("deliver"),
            },
            recent_latencies: recent,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let m = Metrics::new();
        m.inc_requests_submitted();
        m.inc_requests_submitted();
        m.inc_requests_succeeded();
        m.inc_error("E_TRANSPORT");
        m.inc_error("E_MALFORMED_RESPONSE");
        m.inc_error("E_SOMETHING_NEW");

        let s = m.summary();
        assert_eq!(s.requests_submitted, 2);
        assert_eq!(s.requests_succeeded, 1);
        assert_eq!(s.error_counts.transport, 1);
        assert_eq!(s.error_counts.malformed_response, 1);
        assert_eq!(s.error_counts.internal, 1);
    }

    #[test]
    fn test_latency_recording() {
        let m = Metrics::new();
        m.record_latency("process", 120);
        m.record_latency("process", 80);
        m.record_latency("deliver", 200);

        let s = m.summary();
        assert!((s.avg_latency_ms.process.unwrap() - 100.0).abs() < f64::EPSILON);
        assert!((s.avg_latency_ms.deliver.unwrap() - 200.0).abs() < f64::EPSILON);
        assert_eq!(s.recent_latencies.len(), 3);
    }

    #[test]
    fn test_latency_cap() {
        let m = Metrics::new();
        for i in 0..1100 {
            m.record_latency("process", i);
        }
        let latencies = m.latencies.lock().unwrap();
        assert_eq!(latencies.len(), 1000);
    }
}
