//! Warning aggregation across a session's registered sources: dedup by
//! message, keep the highest severity, merge contributing source ids.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedWarning {
    pub message: String,
    pub severity: WarningSeverity,
    pub source_ids: Vec<String>,
}

/// Aggregate raw `(message, severity, source_id)` triples, ranked by
/// severity descending. Messages are deduped case-insensitively.
pub fn aggregate(raw: Vec<(String, WarningSeverity, String)>) -> Vec<AggregatedWarning> {
    let mut warnings: Vec<AggregatedWarning> = Vec::new();

    for (message, severity, source_id) in raw {
        let normalized = message.to_lowercase();
        if let Some(existing) = warnings
            .iter_mut()
            .find(|w| w.message.to_lowercase() == normalized)
        {
            if severity > existing.severity {
                existing.severity = severity;
            }
            if !existing.source_ids.contains(&source_id) {
                existing.source_ids.push(source_id);
            }
        } else {
            warnings.push(AggregatedWarning { message, severity, source_ids: vec![source_id] });
        }
    }

    warnings.sort_by(|a, b| b.severity.cmp(&a.severity));
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_and_ranks_by_severity() {
        let raw = vec![
            ("memory manager not available".to_string(), WarningSeverity::Medium, "memory".to_string()),
            ("Memory Manager Not Available".to_string(), WarningSeverity::High, "knowledge".to_string()),
            ("budget exceeded".to_string(), WarningSeverity::Critical, "budgeter".to_string()),
        ];
        let agg = aggregate(raw);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].severity, WarningSeverity::Critical);
        assert_eq!(agg[1].severity, WarningSeverity::High);
        assert_eq!(agg[1].source_ids.len(), 2);
    }
}
