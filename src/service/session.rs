//! In-memory store of the latest decision per mode and judge

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{DecisionRecord, Judge, Mode};

/// Latest decision per `(mode, judge)`, last write wins
///
/// Records are immutable once stored. A write swaps the whole `Arc`, so a
/// reader holding an earlier record keeps a complete copy.
#[derive(Default)]
pub struct DecisionStore {
    records: RwLock<HashMap<(Mode, Judge), Arc<DecisionRecord>>>,
}

impl DecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any earlier record under the same key
    pub async fn store(&self, record: DecisionRecord) -> Arc<DecisionRecord> {
        let key = (record.mode(), record.judge);
        let record = Arc::new(record);

        let previous = self.records.write().await.insert(key, Arc::clone(&record));

        tracing::debug!(
            id = %record.id,
            mode = key.0.as_str(),
            judge = key.1.as_str(),
            superseded = ?previous.map(|p| p.id),
            "Stored decision"
        );

        record
    }

    pub async fn get(&self, mode: Mode, judge: Judge) -> Option<Arc<DecisionRecord>> {
        self.records.read().await.get(&(mode, judge)).cloned()
    }

    /// Every stored record, ordered by mode then judge
    pub async fn all(&self) -> Vec<Arc<DecisionRecord>> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| (r.mode().as_str(), r.judge.as_str()));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Advantage, CompareDecision, Confidence, Decision, DecisionSource, EvidenceItem, Winner,
    };

    fn record(judge: Judge, winner: Winner) -> DecisionRecord {
        let decision = Decision::Compare(CompareDecision {
            winner,
            confidence: Confidence::High,
            reasoning: "Because".to_string(),
            evidence: vec![EvidenceItem {
                id: "A".to_string(),
                title: "t".to_string(),
                explanation: "e".to_string(),
                beneficiary: winner.label().to_string(),
                advantage: Some(Advantage::Winner),
            }],
            warning: None,
        });
        DecisionRecord::new(DecisionSource::Deterministic, judge, decision)
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let store = DecisionStore::new();
        assert!(store.get(Mode::Compare, Judge::Reliability).await.is_none());

        let stored = store.store(record(Judge::Reliability, Winner::OptionA)).await;
        let fetched = store.get(Mode::Compare, Judge::Reliability).await.unwrap();
        assert_eq!(fetched.id, stored.id);
        assert!(store.get(Mode::Advisory, Judge::Reliability).await.is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins_and_readers_keep_snapshot() {
        let store = DecisionStore::new();
        let first = store.store(record(Judge::Innovation, Winner::OptionA)).await;
        let held = store.get(Mode::Compare, Judge::Innovation).await.unwrap();

        let second = store.store(record(Judge::Innovation, Winner::OptionB)).await;
        let current = store.get(Mode::Compare, Judge::Innovation).await.unwrap();

        assert_eq!(current.id, second.id);
        assert_eq!(held.id, first.id);
        assert_eq!(store.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_all_is_ordered() {
        let store = DecisionStore::new();
        store.store(record(Judge::Reliability, Winner::OptionA)).await;
        store.store(record(Judge::Innovation, Winner::OptionB)).await;

        let judges: Vec<_> = store.all().await.iter().map(|r| r.judge).collect();
        assert_eq!(judges, vec![Judge::Innovation, Judge::Reliability]);
    }
}
