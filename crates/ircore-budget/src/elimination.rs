//! Step 4: eliminate lowest-priority non-essential sections until the
//! pack is under budget or none remain.

use ircore_core::section::Section;

/// Indices of `sections` eligible for elimination (non-essential),
/// ordered lowest-priority first — the order the enforcer should drop
/// them in.
pub fn elimination_order(sections: &[Section]) -> Vec<usize> {
    let mut candidates: Vec<usize> =
        sections.iter().enumerate().filter(|(_, s)| !s.essential).map(|(i, _)| i).collect();
    candidates.sort_by(|&a, &b| {
        sections[a].priority.partial_cmp(&sections[b].priority).unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::section::SectionBucket;

    fn section(id: &str, priority: f64, essential: bool) -> Section {
        let mut s = Section::new(id, SectionBucket::Knowledge, "body");
        s.priority = priority;
        s.essential = essential;
        s
    }

    #[test]
    fn orders_lowest_priority_first_and_skips_essential() {
        let sections = vec![
            section("a", 0.9, false),
            section("b", 0.1, false),
            section("c", 0.0, true),
            section("d", 0.5, false),
        ];
        let order = elimination_order(&sections);
        assert_eq!(order, vec![1, 3, 0]);
    }
}
