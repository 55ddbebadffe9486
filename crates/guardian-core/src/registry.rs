//! Caller-side entity lists.
//!
//! The engine never keeps entities between runs. Callers that hold a list of
//! analysed entities use [`merge`] to add the latest one.

use crate::types::Subject;

/// Prepend `entity` unless an entity with the same id is already listed.
///
/// Returns whether the entity was inserted. An existing entry is left as it
/// was, even if `entity` differs from it.
pub fn merge<E: Subject>(list: &mut Vec<E>, entity: E) -> bool {
    if list.iter().any(|existing| existing.id() == entity.id()) {
        return false;
    }

    list.insert(0, entity);
    true
}
