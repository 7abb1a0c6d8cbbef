//! Classified resources
//!
//! The evaluator only ever looks at a resource's classification. Catalog
//! collaborators implement [`Classified`] on their own document types.

use serde::{Deserialize, Serialize};

use crate::{ClassificationLevel, ResourceId};

/// Anything carrying a classification level
pub trait Classified {
    /// The level this item is classified at
    fn classification(&self) -> ClassificationLevel;
}

impl Classified for ClassificationLevel {
    fn classification(&self) -> ClassificationLevel {
        *self
    }
}

impl<T: Classified + ?Sized> Classified for &T {
    fn classification(&self) -> ClassificationLevel {
        (**self).classification()
    }
}

/// Minimal resource view used by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identity
    pub id: ResourceId,
    /// Sensitivity level
    pub classification: ClassificationLevel,
}

impl Resource {
    /// Create a resource view
    pub fn new(id: ResourceId, classification: ClassificationLevel) -> Self {
        Self { id, classification }
    }
}

impl Classified for Resource {
    fn classification(&self) -> ClassificationLevel {
        self.classification
    }
}
