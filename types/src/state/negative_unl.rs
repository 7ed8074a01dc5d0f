use fl_codec::{WireCodecError, WireDecode, WireEncode, WireInput, WireOutput};
use fl_common::ValidatorKey;
use std::collections::BTreeSet;

/// Ledger-resident Negative UNL state.
///
/// Members of `listed` are disregarded when computing validation quorums.
/// The two pending slots stage at most one addition and one removal each
/// epoch; they are set by modification transactions included in a flag
/// ledger and folded into `listed` when the next flag ledger closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegativeUnlState {
    listed: BTreeSet<ValidatorKey>,
    to_disable: Option<ValidatorKey>,
    to_re_enable: Option<ValidatorKey>,
}

impl NegativeUnlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listed(&self) -> &BTreeSet<ValidatorKey> {
        &self.listed
    }

    pub fn is_listed(&self, key: &ValidatorKey) -> bool {
        self.listed.contains(key)
    }

    pub fn to_disable(&self) -> Option<&ValidatorKey> {
        self.to_disable.as_ref()
    }

    pub fn to_re_enable(&self) -> Option<&ValidatorKey> {
        self.to_re_enable.as_ref()
    }

    /// Stages a validator for disabling at the next flag ledger.
    /// Precondition checks live in the transaction applier.
    pub fn schedule_disable(&mut self, key: ValidatorKey) {
        self.to_disable = Some(key);
    }

    /// Stages a validator for re-enabling at the next flag ledger.
    /// Precondition checks live in the transaction applier.
    pub fn schedule_re_enable(&mut self, key: ValidatorKey) {
        self.to_re_enable = Some(key);
    }

    /// Folds the pending slots into the listed set and clears them.
    /// A no-op when both slots are already clear.
    pub fn fold_pending(&mut self) {
        if let Some(key) = self.to_disable.take() {
            self.listed.insert(key);
        }
        if let Some(key) = self.to_re_enable.take() {
            self.listed.remove(&key);
        }
    }

    /// The listed set as it will stand once the pending slots have been
    /// folded in. Voting always measures against this set.
    pub fn next_listed(&self) -> BTreeSet<ValidatorKey> {
        let mut next = self.listed.clone();
        if let Some(key) = &self.to_disable {
            next.insert(key.clone());
        }
        if let Some(key) = &self.to_re_enable {
            next.remove(key);
        }
        next
    }
}

impl WireEncode for NegativeUnlState {
    fn size_hint(&self) -> usize {
        self.listed.size_hint() + self.to_disable.size_hint() + self.to_re_enable.size_hint()
    }

    fn encode_to<O: WireOutput>(&self, dest: &mut O) -> Result<(), WireCodecError> {
        self.listed.encode_to(dest)?;
        self.to_disable.encode_to(dest)?;
        self.to_re_enable.encode_to(dest)?;
        Ok(())
    }
}

impl WireDecode for NegativeUnlState {
    fn decode<I: WireInput>(input: &mut I) -> Result<Self, WireCodecError> {
        Ok(Self {
            listed: BTreeSet::decode(input)?,
            to_disable: Option::decode(input)?,
            to_re_enable: Option::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tag: u8) -> ValidatorKey {
        ValidatorKey::new(vec![0xED, tag])
    }

    #[test]
    fn fold_moves_pending_into_listed() {
        let mut state = NegativeUnlState::new();
        state.schedule_disable(key(1));
        state.fold_pending();

        assert!(state.is_listed(&key(1)));
        assert!(state.to_disable().is_none());

        state.schedule_re_enable(key(1));
        state.fold_pending();
        assert!(!state.is_listed(&key(1)));
        assert!(state.to_re_enable().is_none());
    }

    #[test]
    fn fold_is_idempotent() {
        let mut state = NegativeUnlState::new();
        state.schedule_disable(key(1));
        state.fold_pending();
        let folded = state.clone();

        state.fold_pending();
        assert_eq!(state, folded);
    }

    #[test]
    fn next_listed_applies_both_slots() {
        let mut state = NegativeUnlState::new();
        state.schedule_disable(key(1));
        state.fold_pending();

        state.schedule_disable(key(2));
        state.schedule_re_enable(key(1));

        let next = state.next_listed();
        assert!(next.contains(&key(2)));
        assert!(!next.contains(&key(1)));
        // The state itself is untouched.
        assert!(state.is_listed(&key(1)));
        assert!(!state.is_listed(&key(2)));
    }

    #[test]
    fn codec_round_trip() {
        let mut state = NegativeUnlState::new();
        state.schedule_disable(key(3));
        state.fold_pending();
        state.schedule_re_enable(key(3));

        let encoded = state.encode().unwrap();
        let mut slice = &encoded[..];
        assert_eq!(NegativeUnlState::decode(&mut slice).unwrap(), state);
        assert!(slice.is_empty());
    }
}
