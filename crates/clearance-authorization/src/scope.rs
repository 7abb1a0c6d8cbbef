//! Access scopes for catalog and search collaborators
//!
//! Listing and search queries are scoped by level rather than checked item
//! by item: the catalog asks for `classification IN (scope)` and the scope is
//! derived from the principal at query time. Scopes are never cached across a
//! grant change.

use clearance_core::{Classified, ClassificationLevel, PermissionAction, Principal};
use serde::{Deserialize, Serialize};

use crate::evaluator::effective_levels;

/// Levels at which a principal may perform one action, ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScope {
    action: PermissionAction,
    levels: Vec<ClassificationLevel>,
}

impl AccessScope {
    /// Scope for `action`
    pub fn for_action(principal: &Principal, action: PermissionAction) -> Self {
        Self {
            action,
            levels: effective_levels(principal, action),
        }
    }

    /// Readable scope
    pub fn readable(principal: &Principal) -> Self {
        Self::for_action(principal, PermissionAction::Read)
    }

    /// Writable scope
    pub fn writable(principal: &Principal) -> Self {
        Self::for_action(principal, PermissionAction::Write)
    }

    /// Action this scope covers
    pub fn action(&self) -> PermissionAction {
        self.action
    }

    /// Levels in scope, ascending
    pub fn levels(&self) -> &[ClassificationLevel] {
        &self.levels
    }

    /// Whether `level` is in scope
    pub fn contains(&self, level: ClassificationLevel) -> bool {
        self.levels.binary_search(&level).is_ok()
    }

    /// Whether nothing is in scope; catalog queries should short-circuit
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest level in scope
    pub fn highest(&self) -> Option<ClassificationLevel> {
        self.levels.last().copied()
    }

    /// Ordinals for an `IN (...)` clause
    pub fn ordinals(&self) -> Vec<u8> {
        self.levels.iter().map(|level| level.ordinal()).collect()
    }

    /// Items whose classification is in scope, in input order
    pub fn filter<I>(&self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::Item: Classified,
    {
        items
            .into_iter()
            .filter(|item| self.contains(item.classification()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::ClassificationLevel::*;
    use clearance_core::{PermissionKey, PrincipalId, Resource, ResourceId};

    fn principal() -> Principal {
        Principal::new(PrincipalId::from_label("reader"), "reader")
            .with_clearance(Secret)
            .with_grants([
                PermissionKey::read(Unclassified),
                PermissionKey::read(Secret),
                PermissionKey::read(TopSecret),
                PermissionKey::write(Unclassified),
            ])
    }

    #[test]
    fn readable_scope_respects_ceiling() {
        let scope = AccessScope::readable(&principal());
        assert_eq!(scope.levels(), &[Unclassified, Secret]);
        assert!(scope.contains(Secret));
        assert!(!scope.contains(Confidential));
        assert!(!scope.contains(TopSecret));
        assert_eq!(scope.ordinals(), vec![0, 2]);
        assert_eq!(scope.highest(), Some(Secret));
    }

    #[test]
    fn filter_keeps_input_order() {
        let docs = vec![
            Resource::new(ResourceId::new(), Secret),
            Resource::new(ResourceId::new(), Confidential),
            Resource::new(ResourceId::new(), Unclassified),
            Resource::new(ResourceId::new(), TopSecret),
        ];
        let scope = AccessScope::readable(&principal());
        let visible: Vec<_> = scope
            .filter(&docs)
            .into_iter()
            .map(|doc| doc.classification)
            .collect();
        assert_eq!(visible, vec![Secret, Unclassified]);
    }

    #[test]
    fn empty_scope() {
        let nobody = Principal::new(PrincipalId::from_label("nobody"), "nobody");
        let scope = AccessScope::writable(&nobody);
        assert!(scope.is_empty());
        assert_eq!(scope.highest(), None);
        assert_eq!(scope.action(), PermissionAction::Write);
    }
}
