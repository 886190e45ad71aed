use crate::language::{AutoClosingPair, OnEnterRule};

/// Concatenate `primary` with the items of `secondary` whose key is not yet
/// present.
///
/// Primary entries always win on collision and keep their order; secondary
/// survivors are appended in their original relative order. A key repeated
/// inside `secondary` is only taken once.
pub fn merge_arrays_by<T, K, F>(primary: Vec<T>, secondary: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: PartialEq + ?Sized,
    F: Fn(&T) -> &K,
{
    let mut merged = primary;
    for item in secondary {
        let exists = merged.iter().any(|existing| key(existing) == key(&item));
        if !exists {
            merged.push(item);
        }
    }
    merged
}

/// Native pairs first: a language's own pairs are never overridden by the
/// generic defaults.
pub fn merge_auto_closing_pairs(native: Vec<AutoClosingPair>, defaults: &[AutoClosingPair]) -> Vec<AutoClosingPair> {
    merge_arrays_by(native, defaults.iter().cloned(), |pair| pair.open.as_str())
}

/// Default rules first: generic multi-line rules take precedence over
/// whatever a third-party language declares for the same trigger.
pub fn merge_enter_rules(defaults: &[OnEnterRule], native: Vec<OnEnterRule>) -> Vec<OnEnterRule> {
    merge_arrays_by(defaults.to_vec(), native, OnEnterRule::trigger)
}
