//! Short summary printed once the attack is over, on top of goose's own tables.
use colored::Colorize;
use goose::metrics::GooseMetrics;

#[derive(Debug, Clone, PartialEq)]
/// Aggregated numbers of one named request
pub struct RequestSummary {
    pub name: String,
    pub total: usize,
    pub failed: usize,
    pub average_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl RequestSummary {
    /// percentage of failed requests
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 * 100.0 / self.total as f64
        }
    }
}

/// one row per request name, sorted by name
pub fn summarize(metrics: &GooseMetrics) -> Vec<RequestSummary> {
    let mut rows: Vec<RequestSummary> = metrics
        .requests
        .iter()
        .map(|(name, aggregate)| {
            let timing = &aggregate.raw_data;
            let average_ms = if timing.counter > 0 {
                timing.total_time as f64 / timing.counter as f64
            } else {
                0.0
            };
            RequestSummary {
                name: name.clone(),
                total: aggregate.success_count + aggregate.fail_count,
                failed: aggregate.fail_count,
                average_ms,
                min_ms: timing.minimum_time as u64,
                max_ms: timing.maximum_time as u64,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

/// sums every row, the average is weighted by request count
pub fn totals(rows: &[RequestSummary]) -> RequestSummary {
    let total: usize = rows.iter().map(|r| r.total).sum();
    let failed = rows.iter().map(|r| r.failed).sum();
    let weighted: f64 = rows.iter().map(|r| r.average_ms * r.total as f64).sum();
    let used = rows.iter().filter(|r| r.total > 0);
    RequestSummary {
        name: "Aggregated".to_string(),
        total,
        failed,
        average_ms: if total > 0 { weighted / total as f64 } else { 0.0 },
        min_ms: used.clone().map(|r| r.min_ms).min().unwrap_or(0),
        max_ms: used.map(|r| r.max_ms).max().unwrap_or(0),
    }
}

fn line(row: &RequestSummary) -> String {
    let text = format!(
        "{:<28} {:>9} {:>9} {:>8.2}% {:>10.1} {:>8} {:>8}",
        row.name,
        row.total,
        row.failed,
        row.error_rate(),
        row.average_ms,
        row.min_ms,
        row.max_ms
    );
    if row.failed == 0 {
        text.green().to_string()
    } else if row.failed < row.total {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// renders the summary table
pub fn render(rows: &[RequestSummary], duration_secs: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("=== shop load test summary ({duration_secs}s) ===").bold()
    ));
    out.push_str(&format!(
        "{:<28} {:>9} {:>9} {:>9} {:>10} {:>8} {:>8}\n",
        "Name", "Requests", "Fails", "Errors", "Avg (ms)", "Min", "Max"
    ));
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    let totals = totals(rows);
    out.push_str(&line(&totals));
    out.push('\n');
    if duration_secs > 0 {
        out.push_str(&format!(
            "throughput: {:.2} req/s\n",
            totals.total as f64 / duration_secs as f64
        ));
    }
    out
}

/// prints the summary of a finished attack
pub fn print(metrics: &GooseMetrics) {
    let rows = summarize(metrics);
    println!("{}", render(&rows, metrics.duration));
}
