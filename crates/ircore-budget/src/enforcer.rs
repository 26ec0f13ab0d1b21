//! Orchestrates the full enforcement algorithm (steps 1-6)
//! over a prioritized [`Section`] list.

use chrono::Utc;
use ircore_core::config::BudgetConfig;
use ircore_core::context_pack::{ImpactLevel, OptimizationType, TokenOptimization, TokenUsageSummary};
use ircore_core::section::Section;
use ircore_tokens::TokenCounter;
use tracing::warn;

use crate::{compression, elimination, truncation};

pub struct BudgetEnforcer<'a> {
    config: &'a BudgetConfig,
    counter: &'a TokenCounter,
}

pub struct EnforcementOutcome {
    pub sections: Vec<Section>,
    pub usage: TokenUsageSummary,
}

impl<'a> BudgetEnforcer<'a> {
    pub fn new(config: &'a BudgetConfig, counter: &'a TokenCounter) -> Self {
        Self { config, counter }
    }

    /// Run steps 1-6 against `sections`, mutating token counts in place
    /// and returning the survivors plus a full usage summary.
    pub fn enforce(&self, mut sections: Vec<Section>, budget: usize) -> EnforcementOutcome {
        for s in &mut sections {
            s.token_count = self.counter.count(&s.content, self.config.counting_method);
        }

        let mut usage = TokenUsageSummary {
            budget_limit: budget,
            ..Default::default()
        };

        // Step 1/2: current total.
        if self.total(&sections) <= budget {
            self.finish(&sections, &mut usage);
            return EnforcementOutcome { sections, usage };
        }

        // Step 3: compression.
        self.compress_all(&mut sections, &mut usage);
        if self.total(&sections) <= budget {
            self.finish(&sections, &mut usage);
            return EnforcementOutcome { sections, usage };
        }

        // Step 4: elimination.
        self.eliminate_until_fit(&mut sections, budget, &mut usage);
        if self.total(&sections) <= budget {
            self.finish(&sections, &mut usage);
            return EnforcementOutcome { sections, usage };
        }

        // Step 5: truncation.
        if self.config.allow_truncation {
            self.truncate_until_fit(&mut sections, budget, &mut usage);
        }

        // Step 6: best-effort, flag if still over.
        if self.total(&sections) > budget {
            usage.warnings.push("budget_exceeded".to_string());
            warn!(
                total = self.total(&sections),
                budget, "token budget exceeded after compression, elimination, and truncation"
            );
        }

        self.finish(&sections, &mut usage);
        EnforcementOutcome { sections, usage }
    }

    fn total(&self, sections: &[Section]) -> usize {
        sections.iter().map(|s| s.token_count).sum()
    }

    fn compress_all(&self, sections: &mut [Section], usage: &mut TokenUsageSummary) {
        for s in sections.iter_mut() {
            if !s.compressible {
                continue;
            }
            let before = s.token_count;
            let compressed = compression::compress(&s.content);
            if compressed == s.content {
                continue;
            }
            s.content = compressed;
            s.token_count = self.counter.count(&s.content, self.config.counting_method);
            let saved = before.saturating_sub(s.token_count);
            if saved > 0 {
                usage.optimizations.push(TokenOptimization {
                    optimization_type: OptimizationType::Compression,
                    description: format!("collapsed whitespace/idioms in section {}", s.id),
                    section_id: s.id.clone(),
                    tokens_saved: saved,
                    impact_level: ImpactLevel::Low,
                    applied_at: Utc::now(),
                });
            }
        }
    }

    fn eliminate_until_fit(&self, sections: &mut Vec<Section>, budget: usize, usage: &mut TokenUsageSummary) {
        loop {
            if self.total(sections) <= budget {
                return;
            }
            let order = elimination::elimination_order(sections);
            let Some(&victim) = order.first() else {
                return;
            };
            let removed = sections.remove(victim);
            warn!(section_id = %removed.id, tokens = removed.token_count, "eliminating section to fit token budget");
            usage.optimizations.push(TokenOptimization {
                optimization_type: OptimizationType::Elimination,
                description: format!("dropped non-essential section {} (priority {:.3})", removed.id, removed.priority),
                section_id: removed.id.clone(),
                tokens_saved: removed.token_count,
                impact_level: ImpactLevel::High,
                applied_at: Utc::now(),
            });
        }
    }

    fn truncate_until_fit(&self, sections: &mut [Section], budget: usize, usage: &mut TokenUsageSummary) {
        let mut order: Vec<usize> = (0..sections.len()).filter(|&i| !sections[i].essential).collect();
        order.sort_by(|&a, &b| {
            sections[a].priority.partial_cmp(&sections[b].priority).unwrap_or(std::cmp::Ordering::Equal)
        });
        for idx in order {
            if self.total(sections) <= budget {
                return;
            }
            let before = sections[idx].token_count;
            let retained = truncation::truncate(&sections[idx].content, self.config.truncation_retain_fraction);
            if retained == sections[idx].content {
                continue;
            }
            sections[idx].content = retained;
            sections[idx].token_count =
                self.counter.count(&sections[idx].content, self.config.counting_method);
            let saved = before.saturating_sub(sections[idx].token_count);
            usage.optimizations.push(TokenOptimization {
                optimization_type: OptimizationType::Truncation,
                description: format!(
                    "truncated section {} to {:.0}% of its length",
                    sections[idx].id,
                    self.config.truncation_retain_fraction * 100.0
                ),
                section_id: sections[idx].id.clone(),
                tokens_saved: saved,
                impact_level: ImpactLevel::Medium,
                applied_at: Utc::now(),
            });
        }
    }

    fn finish(&self, sections: &[Section], usage: &mut TokenUsageSummary) {
        usage.total_tokens = self.total(sections);
        usage.section_tokens =
            sections.iter().map(|s| (s.bucket.as_str().to_string(), s.token_count)).collect();
        usage.recompute_utilization();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::section::SectionBucket;

    fn counter() -> TokenCounter {
        TokenCounter::new()
    }

    fn section(id: &str, words: usize, priority: f64, essential: bool) -> Section {
        let mut s = Section::new(id, SectionBucket::Knowledge, "word ".repeat(words));
        s.priority = priority;
        s.essential = essential;
        s
    }

    #[test]
    fn fits_without_mutation_when_already_under_budget() {
        let config = BudgetConfig::default();
        let counter = counter();
        let enforcer = BudgetEnforcer::new(&config, &counter);
        let sections = vec![section("a", 5, 1.0, false)];
        let outcome = enforcer.enforce(sections, 10_000);
        assert!(outcome.usage.optimizations.is_empty());
        assert!(outcome.usage.total_tokens <= outcome.usage.budget_limit);
    }

    #[test]
    fn escalates_through_elimination_when_compression_is_not_enough() {
        let config = BudgetConfig::default();
        let counter = counter();
        let enforcer = BudgetEnforcer::new(&config, &counter);
        let sections = vec![
            section("essential", 50, 1.0, true),
            section("low", 500, 0.1, false),
            section("mid", 500, 0.5, false),
        ];
        let outcome = enforcer.enforce(sections, 80);
        assert!(outcome.usage.total_tokens <= outcome.usage.budget_limit || outcome.usage.warnings.contains(&"budget_exceeded".to_string()));
        assert!(outcome.sections.iter().any(|s| s.id == "essential"));
        assert!(outcome.usage.optimizations.iter().any(|o| o.optimization_type == OptimizationType::Elimination));
    }

    #[test]
    fn essential_sections_survive_every_stage() {
        let mut config = BudgetConfig::default();
        config.allow_truncation = true;
        let counter = counter();
        let enforcer = BudgetEnforcer::new(&config, &counter);
        let sections = vec![section("keep-me", 1000, 1.0, true)];
        let outcome = enforcer.enforce(sections, 1);
        assert_eq!(outcome.sections.len(), 1);
        assert!(outcome.usage.warnings.contains(&"budget_exceeded".to_string()));
    }
}
