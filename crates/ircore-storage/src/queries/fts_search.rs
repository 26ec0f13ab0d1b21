//! FTS5 full-text search: weighted field-match ranking, snippet
//! generation, and the richer faceted `search()` contract.

use std::collections::BTreeMap;
use std::time::Instant;

use ircore_core::config::StorageConfig;
use ircore_core::entry::Entry;
use ircore_core::errors::IrResult;
use ircore_core::search::{MatchedField, RelevanceFactors, SearchFacets, SearchOptions, SearchResponse, SearchResult};
use rusqlite::{params, Connection};

use super::row::{parse_entry_row, str_to_kind, ENTRY_COLUMNS};
use crate::errors::to_ir_err;

const MAX_SNIPPETS_PER_ENTRY: usize = 3;

struct EffectiveWeights {
    title: f64,
    tag: f64,
    content: f64,
    category: f64,
    highlight_open: String,
    highlight_close: String,
}

fn resolve(config: &StorageConfig, options: &SearchOptions) -> EffectiveWeights {
    EffectiveWeights {
        title: options.title_weight.unwrap_or(config.title_weight),
        tag: options.tag_weight.unwrap_or(config.tag_weight),
        content: options.content_weight.unwrap_or(config.content_weight),
        category: options.category_weight.unwrap_or(config.category_weight),
        highlight_open: options.highlight_open.clone().unwrap_or_else(|| config.highlight_open.clone()),
        highlight_close: options.highlight_close.clone().unwrap_or_else(|| config.highlight_close.clone()),
    }
}

/// Search entries using FTS5, ranked by the weighted field-match model:
/// `bm25(entries_fts, ...)` supplies the per-column (title/body/tags/
/// category) weighting, then recency/effectiveness/usage boosts are added
/// in Rust, a minimum-score cutoff is applied, and snippets are generated
/// for survivors. Ties break on (higher effectiveness, more recent
/// modification, lower ID lexicographically).
pub fn search_fts(
    conn: &Connection,
    query: &str,
    limit: usize,
    config: &StorageConfig,
    options: &SearchOptions,
) -> IrResult<Vec<SearchResult>> {
    let weights = resolve(config, options);
    let sql = format!(
        "SELECT {cols}, bm25(entries_fts, ?1, ?2, ?3, ?4) AS bm25_rank
         FROM entries_fts
         JOIN entries e ON e.rowid = entries_fts.rowid
         WHERE entries_fts MATCH ?5",
        cols = ENTRY_COLUMNS.split(", ").map(|c| format!("e.{c}")).collect::<Vec<_>>().join(", "),
    );
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let rows = stmt
        .query_map(
            params![weights.title, weights.content, weights.tag, weights.category, sanitize_match_query(query)],
            |row| {
                let entry = parse_entry_row(row)?;
                let bm25_rank: f64 = row.get("bm25_rank")?;
                Ok((entry, bm25_rank))
            },
        )
        .map_err(to_ir_err)?;

    let terms = query_terms(query);
    let mut results = Vec::new();
    for row in rows {
        let (entry, bm25_rank) = row.map_err(to_ir_err)?;
        let field_score = 1.0 / (1.0 + bm25_rank.max(0.0));
        let (matched_fields, raw_match_count) = matched_fields(&entry, &terms);

        let recency = if config.recency_boost_enabled { recency_boost(&entry, config.recency_half_life_days) } else { 0.0 };
        let effectiveness = if config.effectiveness_boost_enabled { entry.metadata.effectiveness.value() } else { 0.0 };
        let usage = usage_boost(entry.metadata.usage_count, config.usage_boost_k);
        let score = field_score + recency + effectiveness + usage;

        if score < config.min_score {
            continue;
        }

        let mut result = SearchResult::new(entry, score, 0);
        result.relevance_factors = RelevanceFactors {
            title_match: if matched_fields.contains(&MatchedField::Title) { field_score } else { 0.0 },
            content_match: if matched_fields.contains(&MatchedField::Body) { field_score } else { 0.0 },
            tag_match: if matched_fields.contains(&MatchedField::Tag) { field_score } else { 0.0 },
            category_match: if matched_fields.contains(&MatchedField::Category) { field_score } else { 0.0 },
            recency,
            effectiveness,
            usage,
        };
        result.matched_fields = matched_fields;
        result.raw_match_count = raw_match_count;
        result.highlighted_title = Some(highlight(&result.entry.title, &terms, &weights.highlight_open, &weights.highlight_close));
        result.snippets = snippets(&result.entry.body, &terms, config.max_snippet_len, &weights.highlight_open, &weights.highlight_close);
        results.push(result);
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.entry.metadata.effectiveness.value().partial_cmp(&a.entry.metadata.effectiveness.value()).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| b.entry.last_modified.cmp(&a.entry.last_modified))
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });
    results.truncate(limit);
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }
    Ok(results)
}

/// The public `search()` contract: `search_fts`'s ranked page plus facet
/// counts and the total match count over every row the FTS MATCH clause
/// touched (not just the returned page), and wall-clock execution time.
pub fn search(
    conn: &Connection,
    query: &str,
    limit: usize,
    config: &StorageConfig,
    options: &SearchOptions,
) -> IrResult<SearchResponse> {
    let start = Instant::now();
    let results = search_fts(conn, query, limit, config, options)?;
    let total_matches = total_matches(conn, query)?;
    let facets = facets(conn, query)?;
    Ok(SearchResponse {
        results,
        facets,
        total_matches,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn total_matches(conn: &Connection, query: &str) -> IrResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entries_fts WHERE entries_fts MATCH ?1",
            params![sanitize_match_query(query)],
            |row| row.get(0),
        )
        .map_err(to_ir_err)?;
    Ok(count as usize)
}

fn facets(conn: &Connection, query: &str) -> IrResult<SearchFacets> {
    let mut by_kind = BTreeMap::new();
    let mut stmt = conn
        .prepare(
            "SELECT e.kind, COUNT(*) FROM entries_fts
             JOIN entries e ON e.rowid = entries_fts.rowid
             WHERE entries_fts MATCH ?1 GROUP BY e.kind",
        )
        .map_err(to_ir_err)?;
    let rows = stmt
        .query_map(params![sanitize_match_query(query)], |row| {
            let kind: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((str_to_kind(&kind).as_str().to_string(), count as usize))
        })
        .map_err(to_ir_err)?;
    for row in rows {
        let (kind, count) = row.map_err(to_ir_err)?;
        by_kind.insert(kind, count);
    }

    let mut by_category = BTreeMap::new();
    let mut stmt = conn
        .prepare(
            "SELECT e.category, COUNT(*) FROM entries_fts
             JOIN entries e ON e.rowid = entries_fts.rowid
             WHERE entries_fts MATCH ?1 AND e.category IS NOT NULL GROUP BY e.category",
        )
        .map_err(to_ir_err)?;
    let rows = stmt
        .query_map(params![sanitize_match_query(query)], |row| {
            let category: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((category, count as usize))
        })
        .map_err(to_ir_err)?;
    for row in rows {
        let (category, count) = row.map_err(to_ir_err)?;
        by_category.insert(category, count);
    }

    Ok(SearchFacets { by_kind, by_category })
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|term| term.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn recency_boost(entry: &Entry, half_life_days: f64) -> f64 {
    let age_days = (chrono::Utc::now() - entry.last_modified).num_seconds() as f64 / 86_400.0;
    (-std::f64::consts::LN_2 * age_days.max(0.0) / half_life_days).exp()
}

fn usage_boost(usage_count: u64, k: f64) -> f64 {
    (1.0 + usage_count as f64).ln() / k
}

fn matched_fields(entry: &Entry, terms: &[String]) -> (std::collections::HashSet<MatchedField>, usize) {
    let mut fields = std::collections::HashSet::new();
    let mut count = 0usize;
    let title = entry.title.to_lowercase();
    let body = entry.body.to_lowercase();
    let tags = entry.metadata.tags.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>().join(" ");
    let category = entry.metadata.category.as_deref().unwrap_or("").to_lowercase();

    for term in terms {
        if title.contains(term.as_str()) {
            fields.insert(MatchedField::Title);
            count += title.matches(term.as_str()).count();
        }
        if body.contains(term.as_str()) {
            fields.insert(MatchedField::Body);
            count += body.matches(term.as_str()).count();
        }
        if tags.contains(term.as_str()) {
            fields.insert(MatchedField::Tag);
            count += tags.matches(term.as_str()).count();
        }
        if !category.is_empty() && category.contains(term.as_str()) {
            fields.insert(MatchedField::Category);
            count += category.matches(term.as_str()).count();
        }
    }
    (fields, count)
}

fn highlight(text: &str, terms: &[String], open: &str, close: &str) -> String {
    if terms.is_empty() {
        return text.to_string();
    }
    let lower = text.to_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let matched_len = terms.iter().filter(|t| !t.is_empty()).find_map(|term| {
            lower[i..].starts_with(term.as_str()).then_some(term.len())
        });
        match matched_len {
            Some(len) => {
                out.push_str(open);
                out.push_str(&text[i..i + len]);
                out.push_str(close);
                i += len;
            }
            None => {
                let ch_len = text[i..].chars().next().map(char::len_utf8).unwrap_or(1);
                out.push_str(&text[i..i + ch_len]);
                i += ch_len;
            }
        }
    }
    out
}

/// Emit up to [`MAX_SNIPPETS_PER_ENTRY`] windows of `±max_snippet_len/2`
/// characters around each match position in `body`, each match highlighted.
fn snippets(body: &str, terms: &[String], max_snippet_len: usize, open: &str, close: &str) -> Vec<String> {
    if terms.is_empty() {
        return Vec::new();
    }
    let lower = body.to_lowercase();
    let half = max_snippet_len / 2;
    let mut positions = Vec::new();
    for term in terms.iter().filter(|t| !t.is_empty()) {
        let mut start = 0;
        while let Some(pos) = lower[start..].find(term.as_str()) {
            positions.push(start + pos);
            start += pos + term.len();
        }
    }
    positions.sort_unstable();
    positions.dedup();

    let mut out = Vec::new();
    for pos in positions.into_iter().take(MAX_SNIPPETS_PER_ENTRY) {
        let window_start = pos.saturating_sub(half);
        let window_end = (pos + half).min(body.len());
        let start = floor_char_boundary(body, window_start);
        let end = ceil_char_boundary(body, window_end);
        out.push(highlight(&body[start..end], terms, open, close));
    }
    out
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// FTS5 MATCH syntax treats `"`, `*`, `:`, and a leading `-` specially;
/// a raw user query containing them would either error or silently
/// become a different query (e.g. a column filter or NOT clause).
/// Quoting the whole string as an FTS5 string literal and escaping
/// embedded quotes makes any input searched literally.
fn sanitize_match_query(query: &str) -> String {
    format!("\"{}\"", query.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_escapes_quotes() {
        assert_eq!(sanitize_match_query("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn sanitize_wraps_plain_query() {
        assert_eq!(sanitize_match_query("hello world"), "\"hello world\"");
    }

    #[test]
    fn query_terms_lowercases_and_strips_punctuation() {
        assert_eq!(query_terms("Authentication, JWT!"), vec!["authentication", "jwt"]);
    }

    #[test]
    fn highlight_wraps_every_occurrence() {
        let out = highlight("JWT auth uses jwt tokens", &["jwt".to_string()], "<mark>", "</mark>");
        assert_eq!(out, "<mark>JWT</mark> auth uses <mark>jwt</mark> tokens");
    }

    #[test]
    fn usage_boost_is_zero_when_never_used() {
        assert_eq!(usage_boost(0, 5.0), 0.0);
    }
}
