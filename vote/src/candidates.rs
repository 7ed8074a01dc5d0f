use fl_common::{
    max_negative_listed, Hash32, NodeId, HIGH_WATER_MARK, LOW_WATER_MARK, NODE_ID_SIZE,
};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// The candidate sets one voting run selects from.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub to_disable: Vec<NodeId>,
    pub to_re_enable: Vec<NodeId>,
}

/// Selects disable and re-enable candidates from a score table.
///
/// `next_listed` is the Negative UNL as it will stand once the parent's
/// pending slots fold in. Disabling stops once a quarter of the UNL is
/// listed, skips anything already listed, and shields validators in
/// `new_validators`. Re-enabling requires a score above the high watermark;
/// when nothing qualifies, listed validators that have left the UNL are
/// offered instead, since their score can never recover.
pub fn find_candidates(
    unl: &HashSet<NodeId>,
    next_listed: &HashSet<NodeId>,
    scores: &HashMap<NodeId, u32>,
    new_validators: &HashSet<NodeId>,
) -> Candidates {
    let max_listed = max_negative_listed(unl.len());
    let currently_listed = unl.iter().filter(|nid| next_listed.contains(*nid)).count();
    let can_disable = currently_listed < max_listed;
    trace!(
        "Selecting candidates: can_disable {can_disable}, listed {currently_listed} of at most {max_listed}"
    );

    let mut candidates = Candidates::default();
    for (nid, score) in scores {
        trace!("Node {} scored {score}", hex::encode(nid));

        if can_disable
            && *score < LOW_WATER_MARK
            && !next_listed.contains(nid)
            && !new_validators.contains(nid)
        {
            candidates.to_disable.push(*nid);
        }

        if *score > HIGH_WATER_MARK && next_listed.contains(nid) {
            candidates.to_re_enable.push(*nid);
        }
    }

    if candidates.to_re_enable.is_empty() {
        // A listed validator that is no longer trusted can never score
        // again; retire it through the fallback.
        for nid in next_listed {
            if !unl.contains(nid) {
                candidates.to_re_enable.push(*nid);
            }
        }
    }

    candidates
}

/// Deterministically picks one candidate, keyed by a public random pad.
///
/// All honest nodes pass the same pad (the parent ledger hash) and
/// therefore pick the same candidate: the one minimizing `nid XOR pad`
/// in 160-bit unsigned order.
pub fn pick_one_candidate(pad_source: &Hash32, candidates: &[NodeId]) -> Option<NodeId> {
    let mut pad = [0u8; NODE_ID_SIZE];
    pad.copy_from_slice(&pad_source[..NODE_ID_SIZE]);
    candidates
        .iter()
        .min_by_key(|nid| xor_distance(nid, &pad))
        .copied()
}

fn xor_distance(nid: &NodeId, pad: &NodeId) -> NodeId {
    std::array::from_fn(|i| nid[i] ^ pad[i])
}
