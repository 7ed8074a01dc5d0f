use fl_common::{NodeId, FLAG_LEDGER_PERIOD, MIN_LOCAL_VALIDATIONS};
use fl_state::{Ledger, ValidationStore};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why no score table could be produced for this window. Every variant
/// makes the local node abstain for the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("ancestor table covers only {have} of {want} ledgers")]
    InsufficientHistory { have: usize, want: usize },
    #[error("local node issued only {count} validations in the last {window} ledgers")]
    LocalUnderParticipation { count: u32, window: u32 },
    #[error("local node issued {count} validations in the last {window} ledgers, more than the window")]
    LocalOverParticipation { count: u32, window: u32 },
}

/// Builds the reliability score table for one measurement window.
///
/// Counts, per UNL member, how many of the parent ledger's most recent
/// `FLAG_LEDGER_PERIOD` ancestors that member validated. The table is only
/// trustworthy when the local node itself observed the window, so the
/// local score gates the result: too few own validations and the node must
/// not judge its peers; more validations than ledgers means the validation
/// container is malformed.
pub fn build_score_table(
    parent: &Ledger,
    unl: &HashSet<NodeId>,
    my_id: &NodeId,
    validations: &dyn ValidationStore,
) -> Result<HashMap<NodeId, u32>, ScoreError> {
    let window = FLAG_LEDGER_PERIOD as usize;
    let ancestors =
        parent
            .ancestors()
            .recent_window(window)
            .ok_or(ScoreError::InsufficientHistory {
                have: parent.ancestors().len(),
                want: window,
            })?;

    let mut scores: HashMap<NodeId, u32> = unl.iter().map(|nid| (*nid, 0)).collect();
    for hash in ancestors {
        for nid in validations.trusted_validators_for(hash) {
            if let Some(score) = scores.get_mut(&nid) {
                *score += 1;
            }
        }
    }

    // A node outside the UNL scores zero and abstains below.
    let my_count = scores.get(my_id).copied().unwrap_or(0);
    if my_count < MIN_LOCAL_VALIDATIONS {
        return Err(ScoreError::LocalUnderParticipation {
            count: my_count,
            window: FLAG_LEDGER_PERIOD,
        });
    }
    if my_count > FLAG_LEDGER_PERIOD {
        // The validation container returns at most one entry per
        // (validator, ledger), so this indicates a bug in the container.
        return Err(ScoreError::LocalOverParticipation {
            count: my_count,
            window: FLAG_LEDGER_PERIOD,
        });
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_state::{MemoryValidationStore, OpenView};
    use std::sync::Arc;

    fn nid(tag: u8) -> NodeId {
        let mut id = NodeId::default();
        id[0] = tag;
        id
    }

    /// Builds a chain of `len` closed ledgers past genesis, recording one
    /// validation per ledger for each of `validators`.
    fn build_chain(
        len: u32,
        validators: &[NodeId],
        store: &mut MemoryValidationStore,
    ) -> Arc<Ledger> {
        let mut ledger = Ledger::genesis().unwrap();
        for _ in 0..len {
            ledger = OpenView::on_parent(&ledger).close().unwrap();
            for v in validators {
                store.record(*ledger.hash(), *v);
            }
        }
        ledger
    }

    #[test]
    fn short_history_fails() {
        let mut store = MemoryValidationStore::new();
        let my = nid(0);
        let parent = build_chain(FLAG_LEDGER_PERIOD - 1, &[my], &mut store);
        let unl = HashSet::from([my]);

        assert!(matches!(
            build_score_table(&parent, &unl, &my, &store),
            Err(ScoreError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn full_participation_scores_the_window() {
        let mut store = MemoryValidationStore::new();
        let ids = [nid(0), nid(1), nid(2)];
        let parent = build_chain(FLAG_LEDGER_PERIOD + 5, &ids, &mut store);
        let unl: HashSet<NodeId> = ids.into_iter().collect();

        let scores = build_score_table(&parent, &unl, &ids[0], &store).unwrap();
        assert_eq!(scores.len(), 3);
        for id in &ids {
            assert_eq!(scores[id], FLAG_LEDGER_PERIOD);
        }
    }

    #[test]
    fn validations_outside_the_unl_are_ignored() {
        let mut store = MemoryValidationStore::new();
        let my = nid(0);
        let stranger = nid(9);
        let parent = build_chain(FLAG_LEDGER_PERIOD + 2, &[my, stranger], &mut store);
        let unl = HashSet::from([my]);

        let scores = build_score_table(&parent, &unl, &my, &store).unwrap();
        assert_eq!(scores.len(), 1);
        assert!(!scores.contains_key(&stranger));
    }

    #[test]
    fn silent_local_node_abstains() {
        let mut store = MemoryValidationStore::new();
        let my = nid(0);
        let other = nid(1);
        let parent = build_chain(FLAG_LEDGER_PERIOD + 2, &[other], &mut store);
        let unl = HashSet::from([my, other]);

        assert_eq!(
            build_score_table(&parent, &unl, &my, &store),
            Err(ScoreError::LocalUnderParticipation {
                count: 0,
                window: FLAG_LEDGER_PERIOD
            })
        );
    }

    #[test]
    fn local_node_outside_the_unl_abstains() {
        let mut store = MemoryValidationStore::new();
        let my = nid(0);
        let other = nid(1);
        let parent = build_chain(FLAG_LEDGER_PERIOD + 2, &[my, other], &mut store);
        let unl = HashSet::from([other]);

        assert!(matches!(
            build_score_table(&parent, &unl, &my, &store),
            Err(ScoreError::LocalUnderParticipation { count: 0, .. })
        ));
    }
}
