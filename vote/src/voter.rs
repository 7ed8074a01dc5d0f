use crate::{build_score_table, find_candidates, pick_one_candidate, NewValidatorTracker, ScoreError};
use fl_codec::WireCodecError;
use fl_common::{is_flag_ledger, LedgerSeq, NodeId, ValidatorKey};
use fl_crypto::node_id;
use fl_state::{Ledger, ValidationStore};
use fl_types::{TxSet, UnlModify, UnlModifyOp};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("Codec error: {0}")]
    Codec(#[from] WireCodecError),
}

/// Casts the local node's Negative UNL vote at each flag ledger.
///
/// One instance lives for the life of the process; it carries the
/// new-validator memory across epochs.
#[derive(Debug)]
pub struct NegativeUnlVoter {
    my_id: NodeId,
    new_validators: NewValidatorTracker,
}

impl NegativeUnlVoter {
    pub fn new(my_id: NodeId) -> Self {
        Self {
            my_id,
            new_validators: NewValidatorTracker::new(),
        }
    }

    pub fn my_id(&self) -> &NodeId {
        &self.my_id
    }

    /// Tells the voter that validators were added to the trusted list, so
    /// they are shielded from disabling for one full window. Called from
    /// the trusted-list update thread.
    pub fn note_newly_trusted(&self, seq: LedgerSeq, now_trusted: &HashSet<NodeId>) {
        self.new_validators.note_newly_trusted(seq, now_trusted);
    }

    /// Votes on the flag ledger following `parent`, inserting at most one
    /// disable and one re-enable transaction into `proposal`.
    ///
    /// Abstains (emitting nothing) when the window cannot be scored or the
    /// local node's own participation disqualifies it. Re-running with the
    /// same inputs produces byte-identical transactions.
    pub fn vote(
        &self,
        parent: &Ledger,
        unl: &BTreeSet<ValidatorKey>,
        validations: &dyn ValidationStore,
        proposal: &mut TxSet,
    ) -> Result<(), VoteError> {
        let seq = parent.seq() + 1;
        if !is_flag_ledger(seq) {
            debug!("Not voting at seq={seq}, not a flag ledger");
            return Ok(());
        }
        validations.keep_up_to(seq);
        self.new_validators.purge(seq);

        // The vote computes over fingerprints; remember each fingerprint's
        // key so the chosen candidate can be turned back into a
        // transaction payload. Keys found only in the parent's list cover
        // validators that have left the UNL.
        let mut id_to_key: HashMap<NodeId, ValidatorKey> = HashMap::new();
        let mut unl_ids = HashSet::with_capacity(unl.len());
        for key in unl {
            let nid = node_id(key);
            id_to_key.entry(nid).or_insert_with(|| key.clone());
            unl_ids.insert(nid);
        }

        let next_keys = parent.negative_unl().next_listed();
        let mut next_ids = HashSet::with_capacity(next_keys.len());
        for key in &next_keys {
            let nid = node_id(key);
            id_to_key.entry(nid).or_insert_with(|| key.clone());
            next_ids.insert(nid);
        }

        let scores = match build_score_table(parent, &unl_ids, &self.my_id, validations) {
            Ok(scores) => scores,
            Err(err @ ScoreError::LocalOverParticipation { .. }) => {
                error!("Abstaining at seq={seq}: {err}");
                return Ok(());
            }
            Err(err) => {
                debug!("Abstaining at seq={seq}: {err}");
                return Ok(());
            }
        };

        let candidates = find_candidates(
            &unl_ids,
            &next_ids,
            &scores,
            &self.new_validators.tracked(),
        );

        if let Some(nid) = pick_one_candidate(parent.hash(), &candidates.to_disable) {
            if let Some(key) = id_to_key.get(&nid) {
                add_tx(seq, UnlModifyOp::Disable, key, proposal)?;
            }
        }
        if let Some(nid) = pick_one_candidate(parent.hash(), &candidates.to_re_enable) {
            if let Some(key) = id_to_key.get(&nid) {
                add_tx(seq, UnlModifyOp::ReEnable, key, proposal)?;
            }
        }
        Ok(())
    }
}

fn add_tx(
    seq: LedgerSeq,
    op: UnlModifyOp,
    validator: &ValidatorKey,
    proposal: &mut TxSet,
) -> Result<(), VoteError> {
    let tx = match op {
        UnlModifyOp::Disable => UnlModify::disable(seq, validator.clone()),
        UnlModifyOp::ReEnable => UnlModify::re_enable(seq, validator.clone()),
    };
    let id = tx.id()?;
    if proposal.insert(tx)? {
        debug!(
            "Proposed {op:?} of {validator} at seq={seq} in tx {}",
            hex::encode(id)
        );
    } else {
        warn!("Proposal set already contains tx {}", hex::encode(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_state::{MemoryValidationStore, OpenView};
    use fl_common::FLAG_LEDGER_PERIOD;
    use std::sync::Arc;

    fn keys(n: u8) -> Vec<ValidatorKey> {
        (0..n)
            .map(|i| {
                let mut raw = vec![0u8; 33];
                raw[0] = 0xED;
                raw[1] = i + 1;
                ValidatorKey::new(raw)
            })
            .collect()
    }

    /// Closes ledgers until the next vote targets a scoreable flag ledger,
    /// recording validations for `validating` on every closed ledger.
    fn build_history(
        until_parent: u32,
        validating: &[NodeId],
        store: &mut MemoryValidationStore,
    ) -> Arc<Ledger> {
        let mut ledger = Ledger::genesis().unwrap();
        while ledger.seq() < until_parent {
            ledger = OpenView::on_parent(&ledger).close().unwrap();
            for v in validating {
                store.record(*ledger.hash(), *v);
            }
        }
        ledger
    }

    #[test]
    fn no_vote_outside_flag_ledgers() {
        let unl: BTreeSet<ValidatorKey> = keys(4).into_iter().collect();
        let ids: Vec<NodeId> = unl.iter().map(node_id).collect();
        let mut store = MemoryValidationStore::new();
        let parent = build_history(2 * FLAG_LEDGER_PERIOD, &ids, &mut store);

        let voter = NegativeUnlVoter::new(ids[0]);
        let mut proposal = TxSet::new();
        voter.vote(&parent, &unl, &store, &mut proposal).unwrap();
        assert!(proposal.is_empty());
    }

    #[test]
    fn abstains_without_history() {
        let unl: BTreeSet<ValidatorKey> = keys(4).into_iter().collect();
        let ids: Vec<NodeId> = unl.iter().map(node_id).collect();
        let mut store = MemoryValidationStore::new();
        // The parent of the first flag ledger cannot cover a full window.
        let parent = build_history(FLAG_LEDGER_PERIOD - 1, &ids, &mut store);

        let voter = NegativeUnlVoter::new(ids[0]);
        let mut proposal = TxSet::new();
        voter.vote(&parent, &unl, &store, &mut proposal).unwrap();
        assert!(proposal.is_empty());
    }

    #[test]
    fn votes_are_deterministic() {
        let all = keys(6);
        let unl: BTreeSet<ValidatorKey> = all.iter().cloned().collect();
        let ids: Vec<NodeId> = unl.iter().map(node_id).collect();
        let mut store = MemoryValidationStore::new();
        // Two of the six never validate.
        let parent = build_history(2 * FLAG_LEDGER_PERIOD - 1, &ids[..4], &mut store);

        let voter = NegativeUnlVoter::new(ids[0]);
        let encode_all = |set: &TxSet| -> Vec<Vec<u8>> {
            set.iter()
                .map(|(_, tx)| fl_codec::WireEncode::encode(tx).unwrap())
                .collect()
        };

        let mut first = TxSet::new();
        voter.vote(&parent, &unl, &store, &mut first).unwrap();
        let mut second = TxSet::new();
        voter.vote(&parent, &unl, &store, &mut second).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(encode_all(&first), encode_all(&second));
    }
}
