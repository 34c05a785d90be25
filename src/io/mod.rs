//! Instance file I/O.
//!
//! Reads and writes the JSON instance record: cardinalities, per-order
//! payments and crew sizes, and four relation blocks, each a
//! `{count, pairs}` object. An `is_random` flag switches to the
//! generator path ([`generator`]) instead of literal data; generated
//! instances can be echoed back to disk so a random run is replayable
//! as a literal one.

pub mod generator;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Instance, Order, OrderPair, WorkerPair};
use crate::validation::{join_messages, validate_instance};

/// A `{count, pairs}` relation block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairBlock {
    /// Declared pair count; checked against `pairs.len()` on load.
    pub count: usize,
    /// The pairs themselves.
    pub pairs: Vec<[usize; 2]>,
}

impl PairBlock {
    /// Creates a block whose count matches its pairs.
    pub fn from_pairs(pairs: Vec<[usize; 2]>) -> Self {
        Self {
            count: pairs.len(),
            pairs,
        }
    }
}

/// Crew-size field: a single size shared by every order, or one entry
/// per order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrewField {
    /// Every order needs the same crew size.
    Uniform(u32),
    /// Per-order crew sizes, aligned to the order index.
    PerOrder(Vec<u32>),
}

/// On-disk instance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceFile {
    /// Generate the instance instead of reading literal data.
    #[serde(default)]
    pub is_random: bool,
    /// Number of orders.
    pub number_of_orders: usize,
    /// Number of workers.
    pub number_of_workers: usize,
    /// Per-order profits (literal path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<f64>>,
    /// Crew sizes (literal path); defaults to 1 per order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers_per_order: Option<CrewField>,
    /// Sequential-order pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential_orders: Option<PairBlock>,
    /// Non-consecutive-order pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_seq_orders: Option<PairBlock>,
    /// Repetitive-order pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetitive_orders: Option<PairBlock>,
    /// Conflicting-worker pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflictive_workers: Option<PairBlock>,
    /// Upper profit bound (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payment_per_order: Option<u32>,
    /// Upper crew-size bound, exclusive (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_worker_per_order: Option<u32>,
    /// Sequential pair count (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sequential_orders: Option<usize>,
    /// Non-consecutive pair count (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_non_seq_order: Option<usize>,
    /// Repetitive pair count (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_repetitive_orders: Option<usize>,
    /// Fraction of the worker pool drawn into conflicts (random path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_of_conflict: Option<f64>,
}

/// Errors loading or saving an instance file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read or written.
    #[error("cannot access instance file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for the instance schema.
    #[error("malformed instance file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The data is structurally invalid.
    #[error("invalid instance: {0}")]
    Invalid(String),
}

/// A loaded instance plus how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedInstance {
    /// The validated instance.
    pub instance: Instance,
    /// Whether the generator path produced it.
    pub was_generated: bool,
}

/// Loads and validates an instance from a JSON file.
///
/// `seed` drives the generator path and is ignored for literal data.
pub fn load_instance(path: &Path, seed: u64) -> Result<LoadedInstance, LoadError> {
    let text = fs::read_to_string(path)?;
    let file: InstanceFile = serde_json::from_str(&text)?;
    let (instance, was_generated) = if file.is_random {
        (generator::generate(&file, seed)?, true)
    } else {
        (instance_from_file(&file)?, false)
    };
    validate_instance(&instance)
        .map_err(|errors| LoadError::Invalid(join_messages(&errors)))?;
    Ok(LoadedInstance {
        instance,
        was_generated,
    })
}

/// Builds an instance from literal file data.
fn instance_from_file(file: &InstanceFile) -> Result<Instance, LoadError> {
    let payments = file
        .payments
        .as_ref()
        .ok_or_else(|| LoadError::Invalid("missing required field 'payments'".into()))?;
    if payments.len() != file.number_of_orders {
        return Err(LoadError::Invalid(format!(
            "'payments' has {} entries but number_of_orders is {}",
            payments.len(),
            file.number_of_orders
        )));
    }

    let crew_sizes: Vec<u32> = match &file.workers_per_order {
        None => vec![1; file.number_of_orders],
        Some(CrewField::Uniform(size)) => vec![*size; file.number_of_orders],
        Some(CrewField::PerOrder(sizes)) => {
            if sizes.len() != file.number_of_orders {
                return Err(LoadError::Invalid(format!(
                    "'workers_per_order' has {} entries but number_of_orders is {}",
                    sizes.len(),
                    file.number_of_orders
                )));
            }
            sizes.clone()
        }
    };

    let orders = payments
        .iter()
        .zip(&crew_sizes)
        .enumerate()
        .map(|(id, (profit, crew))| Order::new(id, *profit).with_crew(*crew))
        .collect();

    Ok(Instance::new(orders, file.number_of_workers)
        .with_sequential_pairs(order_pairs(&file.sequential_orders, "sequential_orders"))
        .with_non_consecutive_pairs(order_pairs(&file.non_seq_orders, "non_seq_orders"))
        .with_repetitive_pairs(order_pairs(&file.repetitive_orders, "repetitive_orders"))
        .with_conflicting_workers(worker_pairs(
            &file.conflictive_workers,
            "conflictive_workers",
        )))
}

fn check_count(block: &PairBlock, table: &str) {
    if block.count != block.pairs.len() {
        warn!(
            table,
            declared = block.count,
            actual = block.pairs.len(),
            "relation block count does not match its pairs; using the pairs"
        );
    }
}

fn order_pairs(block: &Option<PairBlock>, table: &str) -> Vec<OrderPair> {
    match block {
        None => Vec::new(),
        Some(block) => {
            check_count(block, table);
            block
                .pairs
                .iter()
                .map(|[first, second]| OrderPair::new(*first, *second))
                .collect()
        }
    }
}

fn worker_pairs(block: &Option<PairBlock>, table: &str) -> Vec<WorkerPair> {
    match block {
        None => Vec::new(),
        Some(block) => {
            check_count(block, table);
            block
                .pairs
                .iter()
                .map(|[first, second]| WorkerPair::new(*first, *second))
                .collect()
        }
    }
}

/// Serializes an instance back into the literal file schema.
pub fn file_from_instance(instance: &Instance) -> InstanceFile {
    InstanceFile {
        is_random: false,
        number_of_orders: instance.order_count(),
        number_of_workers: instance.workers,
        payments: Some(instance.orders.iter().map(|o| o.profit).collect()),
        workers_per_order: Some(CrewField::PerOrder(
            instance.orders.iter().map(|o| o.workers_needed).collect(),
        )),
        sequential_orders: Some(PairBlock::from_pairs(
            instance
                .sequential_pairs
                .iter()
                .map(|p| [p.first, p.second])
                .collect(),
        )),
        non_seq_orders: Some(PairBlock::from_pairs(
            instance
                .non_consecutive_pairs
                .iter()
                .map(|p| [p.first, p.second])
                .collect(),
        )),
        repetitive_orders: Some(PairBlock::from_pairs(
            instance
                .repetitive_pairs
                .iter()
                .map(|p| [p.first, p.second])
                .collect(),
        )),
        conflictive_workers: Some(PairBlock::from_pairs(
            instance
                .conflicting_workers
                .iter()
                .map(|p| [p.first, p.second])
                .collect(),
        )),
        ..InstanceFile::default()
    }
}

/// Writes an instance to disk in the literal file schema.
pub fn save_instance(instance: &Instance, path: &Path) -> Result<(), LoadError> {
    let file = file_from_instance(instance);
    let text = serde_json::to_string_pretty(&file)?;
    fs::write(path, text)?;
    Ok(())
}

/// One-line summary of instance cardinality, for startup logging.
pub fn describe(instance: &Instance) -> String {
    format!(
        "{} order(s), {} worker(s), horizon {}x{}, sequential {}, non-consecutive {}, repetitive {}, conflicts {}",
        instance.order_count(),
        instance.workers,
        instance.days,
        instance.shifts,
        instance.sequential_pairs.len(),
        instance.non_consecutive_pairs.len(),
        instance.repetitive_pairs.len(),
        instance.conflicting_workers.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal_json() -> &'static str {
        r#"{
            "is_random": false,
            "number_of_orders": 3,
            "number_of_workers": 4,
            "payments": [100.0, 150.0, 80.0],
            "workers_per_order": [2, 1, 3],
            "sequential_orders": {"count": 1, "pairs": [[0, 1]]},
            "non_seq_orders": {"count": 1, "pairs": [[1, 2]]},
            "repetitive_orders": {"count": 0, "pairs": []},
            "conflictive_workers": {"count": 1, "pairs": [[0, 3]]}
        }"#
    }

    #[test]
    fn test_parse_literal_instance() {
        let file: InstanceFile = serde_json::from_str(literal_json()).unwrap();
        let instance = instance_from_file(&file).unwrap();

        assert_eq!(instance.order_count(), 3);
        assert_eq!(instance.workers, 4);
        assert_eq!(instance.workers_needed(0), 2);
        assert_eq!(instance.workers_needed(2), 3);
        assert_eq!(instance.sequential_pairs, vec![OrderPair::new(0, 1)]);
        assert_eq!(instance.conflicting_workers, vec![WorkerPair::new(0, 3)]);
        assert!(instance.repetitive_pairs.is_empty());
    }

    #[test]
    fn test_scalar_crew_field() {
        let json = r#"{
            "number_of_orders": 2,
            "number_of_workers": 2,
            "payments": [10.0, 20.0],
            "workers_per_order": 2
        }"#;
        let file: InstanceFile = serde_json::from_str(json).unwrap();
        let instance = instance_from_file(&file).unwrap();
        assert_eq!(instance.workers_needed(0), 2);
        assert_eq!(instance.workers_needed(1), 2);
    }

    #[test]
    fn test_missing_crew_defaults_to_one() {
        let json = r#"{
            "number_of_orders": 1,
            "number_of_workers": 1,
            "payments": [10.0]
        }"#;
        let file: InstanceFile = serde_json::from_str(json).unwrap();
        let instance = instance_from_file(&file).unwrap();
        assert_eq!(instance.workers_needed(0), 1);
    }

    #[test]
    fn test_missing_payments_is_rejected() {
        let json = r#"{"number_of_orders": 1, "number_of_workers": 1}"#;
        let file: InstanceFile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            instance_from_file(&file),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_payment_length_mismatch_is_rejected() {
        let json = r#"{
            "number_of_orders": 3,
            "number_of_workers": 1,
            "payments": [10.0]
        }"#;
        let file: InstanceFile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            instance_from_file(&file),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let file: InstanceFile = serde_json::from_str(literal_json()).unwrap();
        let instance = instance_from_file(&file).unwrap();

        let echoed = file_from_instance(&instance);
        let rebuilt = instance_from_file(&echoed).unwrap();

        assert_eq!(rebuilt.orders, instance.orders);
        assert_eq!(rebuilt.sequential_pairs, instance.sequential_pairs);
        assert_eq!(rebuilt.conflicting_workers, instance.conflicting_workers);
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let file: InstanceFile = serde_json::from_str(literal_json()).unwrap();
        let instance = instance_from_file(&file).unwrap();

        let path = std::env::temp_dir().join(format!(
            "u_workforce_io_test_{}.json",
            std::process::id()
        ));
        save_instance(&instance, &path).unwrap();
        let loaded = load_instance(&path, 0).unwrap();
        let _ = fs::remove_file(&path);

        assert!(!loaded.was_generated);
        assert_eq!(loaded.instance.orders, instance.orders);
    }

    #[test]
    fn test_load_rejects_out_of_range_pairs() {
        let json = r#"{
            "number_of_orders": 2,
            "number_of_workers": 2,
            "payments": [10.0, 20.0],
            "sequential_orders": {"count": 1, "pairs": [[0, 9]]}
        }"#;
        let path = std::env::temp_dir().join(format!(
            "u_workforce_io_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, json).unwrap();
        let result = load_instance(&path, 0);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_describe_mentions_cardinalities() {
        let file: InstanceFile = serde_json::from_str(literal_json()).unwrap();
        let instance = instance_from_file(&file).unwrap();
        let text = describe(&instance);
        assert!(text.contains("3 order(s)"));
        assert!(text.contains("4 worker(s)"));
        assert!(text.contains("horizon 6x5"));
    }
}
