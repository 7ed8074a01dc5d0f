use crate::{ApplyOutcome, PreflightReason, RejectReason};
use fl_common::{is_flag_ledger, ACCOUNT_ID_EMPTY};
use fl_state::OpenView;
use fl_types::{UnlModify, UnlModifyOp};
use tracing::{info, warn};

/// Structural validation of a modification, independent of ledger state.
pub fn preflight_unl_modify(tx: &UnlModify) -> Result<(), PreflightReason> {
    let env = &tx.envelope;
    if env.account != ACCOUNT_ID_EMPTY {
        return Err(PreflightReason::SourceAccountSet);
    }
    if env.fee != 0 {
        return Err(PreflightReason::FeeSet);
    }
    if !env.signing_key.is_empty() || !env.signature.is_empty() {
        return Err(PreflightReason::SignaturePresent);
    }
    if env.sequence != 0 || env.prior_txn.is_some() {
        return Err(PreflightReason::SequenceSet);
    }
    Ok(())
}

/// Validates and applies one Negative UNL modification to an open view.
///
/// On success the corresponding pending slot is set; the listed set itself
/// only changes at the next flag-ledger transition. Every reject leaves
/// the view untouched.
pub fn apply_unl_modify(view: &mut OpenView, tx: &UnlModify) -> ApplyOutcome {
    if let Err(reason) = preflight_unl_modify(tx) {
        warn!("Modification for {} rejected in preflight: {reason}", tx.validator);
        return ApplyOutcome::Preflight(reason);
    }

    let seq = view.seq();
    if !is_flag_ledger(seq) {
        warn!("Modification for {} applied at non-flag ledger seq={seq}", tx.validator);
        return ApplyOutcome::Permanent(RejectReason::NotFlagLedger);
    }
    if tx.seq != seq {
        warn!(
            "Modification for {} carries seq={} inside ledger seq={seq}",
            tx.validator, tx.seq
        );
        return ApplyOutcome::Permanent(RejectReason::SequenceMismatch);
    }

    let state = view.negative_unl_mut();
    match tx.op {
        UnlModifyOp::Disable => {
            if let Some(pending) = state.to_disable() {
                warn!("Disable slot already holds {pending}, rejecting {}", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::SlotOccupied);
            }
            if state.to_re_enable() == Some(&tx.validator) {
                warn!("Disable of {} conflicts with its pending re-enable", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::ConflictingPending);
            }
            if state.is_listed(&tx.validator) {
                warn!("Disable of {} rejected, already listed", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::AlreadyListed);
            }
            info!("Scheduling disable of {} at seq={seq}", tx.validator);
            state.schedule_disable(tx.validator.clone());
        }
        UnlModifyOp::ReEnable => {
            if let Some(pending) = state.to_re_enable() {
                warn!("Re-enable slot already holds {pending}, rejecting {}", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::SlotOccupied);
            }
            if state.to_disable() == Some(&tx.validator) {
                warn!("Re-enable of {} conflicts with its pending disable", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::ConflictingPending);
            }
            if !state.is_listed(&tx.validator) {
                warn!("Re-enable of {} rejected, not listed", tx.validator);
                return ApplyOutcome::Permanent(RejectReason::NotListed);
            }
            info!("Scheduling re-enable of {} at seq={seq}", tx.validator);
            state.schedule_re_enable(tx.validator.clone());
        }
    }
    ApplyOutcome::Success
}

/// State transition function of the Negative UNL at a flag ledger.
///
/// # Transitions
///
/// Folds the pending slots inherited from the previous epoch into the
/// listed set and clears them. Runs before this flag ledger's own
/// modifications are applied; a second invocation is a no-op.
pub fn transition_negative_unl(view: &mut OpenView) {
    let seq = view.seq();
    if !is_flag_ledger(seq) {
        return;
    }

    let state = view.negative_unl_mut();
    if let Some(key) = state.to_disable() {
        info!("Flag ledger seq={seq}: disabling {key}");
    }
    if let Some(key) = state.to_re_enable() {
        info!("Flag ledger seq={seq}: re-enabling {key}");
    }
    state.fold_pending();
}
