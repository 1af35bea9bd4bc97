use serde::Serialize;

use cw_views::RankOutcome;

use crate::{ReportError, TimestampReport};

pub fn render_text(reports: &[TimestampReport], k: usize) -> String {
    let mut out = String::new();
    for report in reports {
        match &report.outcome {
            RankOutcome::NoData => {
                out.push_str(&format!("No data available for timestamp {}\n", report.timestamp));
            }
            RankOutcome::Ranked(records) => {
                out.push_str(&format!(
                    "Top {k} congested traffic lights for timestamp {}:\n",
                    report.timestamp
                ));
                for record in records {
                    out.push_str(&format!(
                        "Light ID: {}, Number of Cars: {}\n",
                        record.signal_id, record.car_count
                    ));
                }
                out.push('\n');
            }
        }
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Ranked,
    NoData,
}

#[derive(Serialize)]
struct Signal {
    signal_id: i64,
    car_count: i64,
}

#[derive(Serialize)]
struct Entry<'a> {
    timestamp: &'a str,
    status: Status,
    signals: Vec<Signal>,
}

/// One JSON object per line, in report order.
pub fn render_json(reports: &[TimestampReport]) -> Result<String, ReportError> {
    let mut out = String::new();
    for report in reports {
        let (status, signals) = match &report.outcome {
            RankOutcome::NoData => (Status::NoData, Vec::new()),
            RankOutcome::Ranked(records) => (
                Status::Ranked,
                records
                    .iter()
                    .map(|r| Signal {
                        signal_id: r.signal_id,
                        car_count: r.car_count,
                    })
                    .collect(),
            ),
        };
        let entry = Entry {
            timestamp: &report.timestamp,
            status,
            signals,
        };
        out.push_str(&serde_json::to_string(&entry)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::SignalRecord;

    fn reports() -> Vec<TimestampReport> {
        vec![
            TimestampReport {
                timestamp: "07:00:00".into(),
                outcome: RankOutcome::Ranked(vec![
                    SignalRecord::new("07:00:00", 2, 40),
                    SignalRecord::new("07:00:00", 1, 12),
                ]),
            },
            TimestampReport {
                timestamp: "09:00:00".into(),
                outcome: RankOutcome::NoData,
            },
        ]
    }

    #[test]
    fn text_layout() {
        let text = render_text(&reports(), 5);
        assert_eq!(
            text,
            "Top 5 congested traffic lights for timestamp 07:00:00:\n\
             Light ID: 2, Number of Cars: 40\n\
             Light ID: 1, Number of Cars: 12\n\
             \n\
             No data available for timestamp 09:00:00\n"
        );
    }

    #[test]
    fn json_lines() {
        let json = render_json(&reports()).unwrap();
        let lines: Vec<serde_json::Value> = json
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "ranked");
        assert_eq!(lines[0]["signals"][0]["signal_id"], 2);
        assert_eq!(lines[1]["status"], "no_data");
        assert_eq!(lines[1]["signals"].as_array().map(Vec::len), Some(0));
    }
}
