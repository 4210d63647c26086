//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which runs a batch of
//! ledger requests concurrently on the tokio runtime.
//!
//! # Design
//!
//! The batch is split into the connected components of the accounts it
//! touches: a transfer links its source and target, a delete or lookup
//! touches one account. Requests that share any account, directly or through
//! a chain of transfers, land in the same partition and run there in input
//! order. Partitions share no account, so running them as separate tokio
//! tasks gives the same final balances as replaying the batch sequentially.
//!
//! Results are returned in input order regardless of which task produced them.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── LedgerEngine (cloned into every task, shares one registry)
//! ```

use std::collections::HashMap;

use tracing::error;

use super::LedgerEngine;
use crate::types::{LedgerError, LedgerOutcome, LedgerRequest};

/// Result of processing a single request
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The request that was processed
    pub request: LedgerRequest,

    /// The outcome, or the error that prevented one
    pub result: Result<LedgerOutcome, LedgerError>,
}

/// Concurrent batch processor
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe ledger engine shared by all tasks
    engine: LedgerEngine,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(engine: LedgerEngine) -> Self {
        Self { engine }
    }

    /// Partition a batch into groups of requests with disjoint accounts
    ///
    /// Each request is tagged with its position in the batch. Partitions are
    /// ordered by their first request.
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one partition
    /// - Requests inside a partition keep their original order
    /// - No account is touched by requests of two different partitions
    pub fn partition_by_accounts(
        &self,
        batch: Vec<LedgerRequest>,
    ) -> Vec<Vec<(usize, LedgerRequest)>> {
        let mut sets = AccountSets::default();
        let mut ids = Vec::with_capacity(batch.len());

        for request in &batch {
            let id = sets.id(&request.account);
            if let Some(target) = &request.target {
                let target_id = sets.id(target);
                sets.union(id, target_id);
            }
            ids.push(id);
        }

        let mut slots: HashMap<usize, usize> = HashMap::new();
        let mut partitions: Vec<Vec<(usize, LedgerRequest)>> = Vec::new();

        for (position, (request, id)) in batch.into_iter().zip(ids).enumerate() {
            let root = sets.find(id);
            let slot = *slots.entry(root).or_insert_with(|| {
                partitions.push(Vec::new());
                partitions.len() - 1
            });
            partitions[slot].push((position, request));
        }

        partitions
    }

    /// Process one partition sequentially
    pub async fn process_partition(
        &self,
        requests: Vec<(usize, LedgerRequest)>,
    ) -> Vec<(usize, ProcessingResult)> {
        let mut results = Vec::with_capacity(requests.len());

        for (position, request) in requests {
            let result = self.engine.process(&request);
            results.push((position, ProcessingResult { request, result }));
        }

        results
    }

    /// Process a batch with account-based partitioning
    ///
    /// 1. Partitions the batch by connected accounts
    /// 2. Spawns one tokio task per partition
    /// 3. Waits for all tasks
    /// 4. Returns the results in input order
    ///
    /// A panicking task is logged and its results are dropped; the remaining
    /// partitions are unaffected.
    pub async fn process_batch(&self, batch: Vec<LedgerRequest>) -> Vec<ProcessingResult> {
        let partitions = self.partition_by_accounts(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for requests in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_partition(requests).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(partition_results) => results.extend(partition_results),
                Err(e) => error!(error = %e, "Batch task failed"),
            }
        }

        results.sort_by_key(|(position, _)| *position);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

/// Disjoint sets of account numbers, merged by transfers between them
#[derive(Debug, Default)]
struct AccountSets {
    ids: HashMap<String, usize>,
    parents: Vec<usize>,
}

impl AccountSets {
    fn id(&mut self, number: &str) -> usize {
        if let Some(&id) = self.ids.get(number) {
            return id;
        }
        let id = self.parents.len();
        self.parents.push(id);
        self.ids.insert(number.to_string(), id);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parents[id] != id {
            // Path halving
            self.parents[id] = self.parents[self.parents[id]];
            id = self.parents[id];
        }
        id
    }

    fn union(&mut self, a: usize, b: usize) {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a != root_b {
            self.parents[root_b] = root_a;
        }
    }
}
