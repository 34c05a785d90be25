//! Random instance generation.
//!
//! Draws an instance from the knobs in the file record: profits uniform
//! in [max/2, max), crew sizes uniform in [1, max_worker_per_order),
//! relation pairs uniform over the order set, and a conflict count
//! proportional to the worker pool. The seed is an explicit parameter
//! so every generated instance is replayable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{Instance, Order, OrderPair, WorkerPair};

use super::{InstanceFile, LoadError};

/// Fraction of the worker pool drawn into conflict pairs by default.
const DEFAULT_CONFLICT_PROBABILITY: f64 = 0.2;

/// Generates an instance from the random-path knobs of `file`.
pub fn generate(file: &InstanceFile, seed: u64) -> Result<Instance, LoadError> {
    let order_count = file.number_of_orders;
    let worker_count = file.number_of_workers;
    if order_count == 0 || worker_count == 0 {
        return Err(LoadError::Invalid(
            "random instance requires at least one order and one worker".into(),
        ));
    }
    let max_payment = file.max_payment_per_order.ok_or_else(|| {
        LoadError::Invalid("missing required field 'max_payment_per_order'".into())
    })?;
    if max_payment < 2 {
        return Err(LoadError::Invalid(
            "'max_payment_per_order' must be at least 2".into(),
        ));
    }

    let max_crew = file
        .max_worker_per_order
        .unwrap_or_else(|| ((worker_count / 2) as u32).max(1));
    let sequential_count = file.max_sequential_orders.unwrap_or(order_count / 10);
    let non_seq_count = file.max_non_seq_order.unwrap_or(order_count / 20);
    let repetitive_count = file.max_repetitive_orders.unwrap_or(order_count / 20);
    let conflict_probability = file
        .probability_of_conflict
        .unwrap_or(DEFAULT_CONFLICT_PROBABILITY);

    let mut rng = SmallRng::seed_from_u64(seed);

    let mut orders = Vec::with_capacity(order_count);
    for id in 0..order_count {
        let profit = f64::from(rng.random_range(max_payment / 2..max_payment));
        let crew = if max_crew > 1 {
            rng.random_range(1..max_crew)
        } else {
            1
        };
        orders.push(Order::new(id, profit).with_crew(crew));
    }

    let sequential = draw_order_pairs(&mut rng, sequential_count, order_count);
    let non_consecutive = draw_order_pairs(&mut rng, non_seq_count, order_count);
    let repetitive = draw_order_pairs(&mut rng, repetitive_count, order_count);

    let conflict_count = (worker_count as f64 * conflict_probability).floor() as usize;
    let conflicts = (0..conflict_count)
        .map(|_| {
            WorkerPair::new(
                rng.random_range(0..worker_count),
                rng.random_range(0..worker_count),
            )
        })
        .collect();

    Ok(Instance::new(orders, worker_count)
        .with_sequential_pairs(sequential)
        .with_non_consecutive_pairs(non_consecutive)
        .with_repetitive_pairs(repetitive)
        .with_conflicting_workers(conflicts))
}

fn draw_order_pairs(rng: &mut SmallRng, count: usize, order_count: usize) -> Vec<OrderPair> {
    (0..count)
        .map(|_| {
            OrderPair::new(
                rng.random_range(0..order_count),
                rng.random_range(0..order_count),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_instance;

    fn random_file() -> InstanceFile {
        InstanceFile {
            is_random: true,
            number_of_orders: 10,
            number_of_workers: 6,
            max_payment_per_order: Some(500),
            max_worker_per_order: Some(3),
            max_sequential_orders: Some(2),
            max_non_seq_order: Some(1),
            max_repetitive_orders: Some(1),
            probability_of_conflict: Some(0.5),
            ..InstanceFile::default()
        }
    }

    #[test]
    fn test_generated_instance_is_valid() {
        let instance = generate(&random_file(), 42).unwrap();
        assert!(validate_instance(&instance).is_ok());
    }

    #[test]
    fn test_generated_cardinalities_respect_knobs() {
        let instance = generate(&random_file(), 42).unwrap();

        assert_eq!(instance.order_count(), 10);
        assert_eq!(instance.workers, 6);
        assert_eq!(instance.sequential_pairs.len(), 2);
        assert_eq!(instance.non_consecutive_pairs.len(), 1);
        assert_eq!(instance.repetitive_pairs.len(), 1);
        assert_eq!(instance.conflicting_workers.len(), 3);

        for order in &instance.orders {
            assert!(order.profit >= 250.0 && order.profit < 500.0);
            assert!(order.workers_needed >= 1 && order.workers_needed < 3);
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let a = generate(&random_file(), 7).unwrap();
        let b = generate(&random_file(), 7).unwrap();
        assert_eq!(a.orders, b.orders);
        assert_eq!(a.sequential_pairs, b.sequential_pairs);
        assert_eq!(a.conflicting_workers, b.conflicting_workers);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = generate(&random_file(), 1).unwrap();
        let b = generate(&random_file(), 2).unwrap();
        assert!(a.orders != b.orders || a.sequential_pairs != b.sequential_pairs);
    }

    #[test]
    fn test_missing_payment_bound_is_rejected() {
        let file = InstanceFile {
            is_random: true,
            number_of_orders: 5,
            number_of_workers: 3,
            ..InstanceFile::default()
        };
        assert!(matches!(generate(&file, 0), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_single_worker_pool_gets_unit_crews() {
        let file = InstanceFile {
            is_random: true,
            number_of_orders: 4,
            number_of_workers: 1,
            max_payment_per_order: Some(100),
            ..InstanceFile::default()
        };
        let instance = generate(&file, 3).unwrap();
        assert!(instance.orders.iter().all(|o| o.workers_needed == 1));
    }
}
