//! Default values for every config struct in this module. Kept in one
//! place so the numbers in `spec.md` §6 are easy to audit against the
//! `Default` impls that use them.

pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 50_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_MAINTENANCE_INTERVAL_SECS: u64 = 3_600;
pub const DEFAULT_VACUUM_THRESHOLD_FRAGMENTATION_PCT: f64 = 20.0;

pub const DEFAULT_FTS_WEIGHT: f64 = 0.4;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.3;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.15;
pub const DEFAULT_EFFECTIVENESS_WEIGHT: f64 = 0.15;
pub const DEFAULT_FUSION_K: f64 = 60.0;
pub const DEFAULT_MAX_RESULTS: usize = 50;

pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_EPSILON_DECAY: f64 = 0.995;
pub const DEFAULT_EPSILON_MIN: f64 = 0.01;
pub const DEFAULT_UCB1_EXPLORATION_CONSTANT: f64 = 2.0;
pub const DEFAULT_REWARD_WINDOW_SIZE: usize = 1_000;

pub const DEFAULT_TOKEN_BUDGET: usize = 8_000;
pub const DEFAULT_RESERVED_HEADROOM: usize = 200;
pub const DEFAULT_COMPRESSION_LEVELS: u8 = 4;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;
pub const DEFAULT_CACHE_MAX_SIZE_MB: u64 = 64;

pub const DEFAULT_PROVENANCE_MIN_TRUST: f64 = 0.2;

pub const DEFAULT_DECAY_TEMPORAL_HALF_LIFE_DAYS: f64 = 30.0;
pub const DEFAULT_DECAY_PROCESSING_INTERVAL_SECS: u64 = 3_600;
pub const DEFAULT_ARCHIVAL_THRESHOLD: f64 = 0.05;

pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_QUEUE_WARNING_THRESHOLD: usize = 1_000;

pub const DEFAULT_RERANKING_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_RERANKING_REGULARIZATION: f64 = 0.001;
pub const DEFAULT_RERANKING_BATCH_SIZE: usize = 32;

pub const DEFAULT_MAX_FEATURE_EXTRACTION_TIME_MS: u64 = 200;
pub const DEFAULT_MAX_RERANKING_CANDIDATES: usize = 200;
pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 10;
pub const DEFAULT_MAX_MEMORY_USAGE_MB: u64 = 512;

pub const DEFAULT_ANALYTICS_RETENTION_DAYS: u32 = 30;
pub const DEFAULT_SLOW_QUERY_THRESHOLD_MS: u64 = 200;
pub const DEFAULT_LOW_RELEVANCE_THRESHOLD: f64 = 0.3;

pub const DEFAULT_TITLE_WEIGHT: f64 = 1.0;
pub const DEFAULT_TAG_WEIGHT: f64 = 0.8;
pub const DEFAULT_CONTENT_WEIGHT: f64 = 0.6;
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 0.4;
pub const DEFAULT_USAGE_BOOST_K: f64 = 5.0;
pub const DEFAULT_MAX_SNIPPET_LEN: usize = 160;
pub const DEFAULT_MAX_SNIPPETS_PER_ENTRY: usize = 3;
pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";

pub const DEFAULT_MEMORY_CONTENT_PCT: f64 = 0.3;
pub const DEFAULT_KNOWLEDGE_CONTENT_PCT: f64 = 0.5;
pub const DEFAULT_REALTIME_CONTENT_PCT: f64 = 0.2;
pub const DEFAULT_MAX_GENERATION_TIME_MS: u64 = 1_000;
pub const DEFAULT_CONTENT_SIMILARITY_THRESHOLD: f64 = 0.85;
