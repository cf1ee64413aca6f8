//! # lookup-bench
//!
//! Microbenchmarks comparing three lookup strategies over small in-memory
//! collections: a linear scan of an unsorted slice, binary search over a
//! sorted slice, and a hash-table probe. Two payload shapes are covered:
//! string key/value records and integer sets.
//!
//! Each benchmark run generates a random fixed-size dataset, picks one of its
//! elements as the query, then times repeated lookups of that query through a
//! single strategy. A run that fails to find the query is a fatal failure of
//! the suite, not a retryable condition.
//!
//! ## Example
//!
//! ```rust
//! use lookup_bench::{GenConfig, KvDataset, Strategy, run_kv};
//!
//! let cfg = GenConfig::default().with_seed(42);
//! let data = KvDataset::generate(&cfg);
//! let report = run_kv(&data, Strategy::Hash, 10_000).unwrap();
//! assert_eq!(report.iterations, 10_000);
//! ```

use std::collections::{HashMap, HashSet};
use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

// =============================================================================
// Configuration
// =============================================================================

/// Dataset generation parameters.
///
/// `count`, `key_len`, and `value_len` are trusted positive inputs; generation
/// itself cannot fail. `seed` controls reproducibility: `Some(n)` produces the
/// same dataset on every run, `None` seeds from OS entropy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenConfig {
    /// Number of elements to generate.
    pub count: usize,
    /// Length of each generated key, in bytes.
    pub key_len: usize,
    /// Length of each generated value, in bytes (key/value shape only).
    pub value_len: usize,
    /// RNG seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            count: 100,
            key_len: 10,
            value_len: 20,
            seed: None,
        }
    }
}

impl GenConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fresh RNG for one dataset population. Built per call so no generator
    /// state leaks between populations.
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// =============================================================================
// Data generation
// =============================================================================

/// A string-keyed record with a string payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

/// Random printable-ASCII string of exactly `len` bytes (range `'0'..'~'`).
fn gen_string(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| rng.gen_range(48u8..126) as char).collect()
}

/// Fills `records` and `map` with `cfg.count` random key/value pairs and
/// returns the key of one element chosen uniformly at random as the query.
///
/// Keys are not deduplicated; at the tested lengths a collision is
/// negligible, and a collision only makes the sequence and the map disagree
/// on element count, never on the query's presence.
pub fn populate_kv(
    records: &mut Vec<Record>,
    map: &mut HashMap<String, String>,
    cfg: &GenConfig,
) -> String {
    let mut rng = cfg.rng();
    let query_idx = rng.gen_range(0..cfg.count);
    let mut query = String::new();

    for i in 0..cfg.count {
        let key = gen_string(&mut rng, cfg.key_len);
        let value = gen_string(&mut rng, cfg.value_len);
        map.insert(key.clone(), value.clone());
        if i == query_idx {
            query = key.clone();
        }
        records.push(Record { key, value });
    }
    query
}

/// Integer-set analogue of [`populate_kv`]: fills `items` and `set` with
/// `cfg.count` random integers and returns one of them as the query.
pub fn populate_ints(items: &mut Vec<i64>, set: &mut HashSet<i64>, cfg: &GenConfig) -> i64 {
    let mut rng = cfg.rng();
    let query_idx = rng.gen_range(0..cfg.count);
    let mut query = 0i64;

    for i in 0..cfg.count {
        let num: i64 = rng.gen();
        items.push(num);
        set.insert(num);
        if i == query_idx {
            query = num;
        }
    }
    query
}

/// Key/value records held twice, as a sequence and as a hash map, so the same
/// query can be resolved through either shape.
#[derive(Clone, Debug)]
pub struct KvDataset {
    pub records: Vec<Record>,
    pub map: HashMap<String, String>,
    /// A key guaranteed present at generation time.
    pub query: String,
}

impl KvDataset {
    pub fn generate(cfg: &GenConfig) -> Self {
        let mut records = Vec::with_capacity(cfg.count);
        let mut map = HashMap::with_capacity(cfg.count);
        let query = populate_kv(&mut records, &mut map, cfg);
        Self {
            records,
            map,
            query,
        }
    }
}

/// Integers held twice, as a sequence and as a hash set.
#[derive(Clone, Debug)]
pub struct IntDataset {
    pub items: Vec<i64>,
    pub set: HashSet<i64>,
    /// An integer guaranteed present at generation time.
    pub query: i64,
}

impl IntDataset {
    pub fn generate(cfg: &GenConfig) -> Self {
        let mut items = Vec::with_capacity(cfg.count);
        let mut set = HashSet::with_capacity(cfg.count);
        let query = populate_ints(&mut items, &mut set, cfg);
        Self { items, set, query }
    }
}

// =============================================================================
// Lookup strategies
// =============================================================================

/// Walks the full slice comparing every key to `query`.
///
/// Deliberately does not short-circuit on a match: the cost is O(N) no matter
/// where the match sits, which keeps timings independent of query position.
pub fn linear_scan_records(records: &[Record], query: &str) -> bool {
    let mut found = false;
    for record in records {
        if record.key == query {
            found = true;
        }
    }
    found
}

/// Integer analogue of [`linear_scan_records`]. Full scan, no short-circuit.
pub fn linear_scan_ints(items: &[i64], query: i64) -> bool {
    let mut found = false;
    for &item in items {
        if item == query {
            found = true;
        }
    }
    found
}

/// In-place ascending sort by key. Stable, so sorting a sorted slice is a
/// no-op even when duplicate keys carry different values.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.key.cmp(&b.key));
}

pub fn sort_ints(items: &mut [i64]) {
    items.sort_unstable();
}

/// Binary search over a sorted slice: locates the leftmost index whose key is
/// `>= query`, then confirms by equality. `records` must already be sorted.
pub fn binary_search_records(records: &[Record], query: &str) -> bool {
    let idx = records.partition_point(|r| r.key.as_str() < query);
    idx < records.len() && records[idx].key == query
}

/// Integer analogue of [`binary_search_records`]. `items` must be sorted.
pub fn binary_search_ints(items: &[i64], query: i64) -> bool {
    let idx = items.partition_point(|&item| item < query);
    idx < items.len() && items[idx] == query
}

/// Single hash probe. True membership check: a key mapped to an empty value
/// still counts as present.
pub fn hash_contains_kv(map: &HashMap<String, String>, query: &str) -> bool {
    map.contains_key(query)
}

pub fn hash_contains_int(set: &HashSet<i64>, query: i64) -> bool {
    set.contains(&query)
}

// =============================================================================
// Measurement driver
// =============================================================================

/// One of the closed set of lookup strategies a run can measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Unsorted full-slice scan.
    Linear,
    /// Sort inside the timed region, then binary search. Measures the
    /// worst case where sort cost cannot be amortized.
    SortEachLookup,
    /// Sort once before timing starts; only the binary search is measured.
    Presorted,
    /// Single hash-table probe.
    Hash,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Linear,
        Strategy::SortEachLookup,
        Strategy::Presorted,
        Strategy::Hash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Linear => "linear",
            Strategy::SortEachLookup => "sort_each",
            Strategy::Presorted => "presorted",
            Strategy::Hash => "hash",
        }
    }
}

/// Outcome of a successful measurement run.
#[derive(Clone, Copy, Debug)]
pub struct RunReport {
    pub strategy: Strategy,
    pub iterations: u64,
    /// Wall time accumulated over all iterations.
    pub elapsed: Duration,
}

impl RunReport {
    /// Mean time per lookup iteration.
    pub fn per_iter(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.elapsed.as_nanos() / u128::from(self.iterations)) as u64)
    }
}

/// A run that does not find its query is a defect in generation or lookup
/// logic, never a transient condition, so it surfaces as a hard error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BenchError {
    #[error("query {query:?} not found by {strategy} lookup after {iterations} iterations")]
    QueryNotFound {
        strategy: &'static str,
        query: String,
        iterations: u64,
    },
}

/// Times `iterations` lookups of `data.query` through `strategy`.
///
/// Fails if the final invocation did not report the query found; with zero
/// iterations no lookup runs and the run fails rather than vacuously passing.
pub fn run_kv(data: &KvDataset, strategy: Strategy, iterations: u64) -> Result<RunReport, BenchError> {
    let query = data.query.as_str();
    let mut found = false;

    let elapsed = match strategy {
        Strategy::Linear => {
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(linear_scan_records(&data.records, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::SortEachLookup => {
            let mut working = data.records.clone();
            let start = Instant::now();
            for _ in 0..iterations {
                sort_records(&mut working);
                found = black_box(binary_search_records(&working, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::Presorted => {
            let mut working = data.records.clone();
            sort_records(&mut working);
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(binary_search_records(&working, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::Hash => {
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(hash_contains_kv(&data.map, black_box(query)));
            }
            start.elapsed()
        }
    };

    if found {
        Ok(RunReport {
            strategy,
            iterations,
            elapsed,
        })
    } else {
        Err(BenchError::QueryNotFound {
            strategy: strategy.name(),
            query: data.query.clone(),
            iterations,
        })
    }
}

/// Integer-set analogue of [`run_kv`].
pub fn run_ints(
    data: &IntDataset,
    strategy: Strategy,
    iterations: u64,
) -> Result<RunReport, BenchError> {
    let query = data.query;
    let mut found = false;

    let elapsed = match strategy {
        Strategy::Linear => {
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(linear_scan_ints(&data.items, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::SortEachLookup => {
            let mut working = data.items.clone();
            let start = Instant::now();
            for _ in 0..iterations {
                sort_ints(&mut working);
                found = black_box(binary_search_ints(&working, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::Presorted => {
            let mut working = data.items.clone();
            sort_ints(&mut working);
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(binary_search_ints(&working, black_box(query)));
            }
            start.elapsed()
        }
        Strategy::Hash => {
            let start = Instant::now();
            for _ in 0..iterations {
                found = black_box(hash_contains_int(&data.set, black_box(query)));
            }
            start.elapsed()
        }
    };

    if found {
        Ok(RunReport {
            strategy,
            iterations,
            elapsed,
        })
    } else {
        Err(BenchError::QueryNotFound {
            strategy: strategy.name(),
            query: data.query.to_string(),
            iterations,
        })
    }
}

// =============================================================================
// Named entry points
// =============================================================================

/// Payload shape a benchmark run operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// String key/value records, held as a slice and as a `HashMap`.
    KvRecords,
    /// Integers, held as a slice and as a `HashSet`.
    IntSet,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::KvRecords => "kv",
            Shape::IntSet => "ints",
        }
    }
}

/// One invocable measurement: a payload shape crossed with a lookup strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryPoint {
    pub shape: Shape,
    pub strategy: Strategy,
}

impl EntryPoint {
    /// All eight shape × strategy combinations.
    pub const ALL: [EntryPoint; 8] = [
        EntryPoint {
            shape: Shape::KvRecords,
            strategy: Strategy::Linear,
        },
        EntryPoint {
            shape: Shape::KvRecords,
            strategy: Strategy::SortEachLookup,
        },
        EntryPoint {
            shape: Shape::KvRecords,
            strategy: Strategy::Presorted,
        },
        EntryPoint {
            shape: Shape::KvRecords,
            strategy: Strategy::Hash,
        },
        EntryPoint {
            shape: Shape::IntSet,
            strategy: Strategy::Linear,
        },
        EntryPoint {
            shape: Shape::IntSet,
            strategy: Strategy::SortEachLookup,
        },
        EntryPoint {
            shape: Shape::IntSet,
            strategy: Strategy::Presorted,
        },
        EntryPoint {
            shape: Shape::IntSet,
            strategy: Strategy::Hash,
        },
    ];

    /// Stable name, e.g. `"kv/linear"` or `"ints/presorted"`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.shape.name(), self.strategy.name())
    }

    /// Generates a fresh dataset from `cfg` and measures `iterations` lookups.
    pub fn run(&self, cfg: &GenConfig, iterations: u64) -> Result<RunReport, BenchError> {
        match self.shape {
            Shape::KvRecords => run_kv(&KvDataset::generate(cfg), self.strategy, iterations),
            Shape::IntSet => run_ints(&IntDataset::generate(cfg), self.strategy, iterations),
        }
    }
}


#[cfg(test)]
mod proptests;
