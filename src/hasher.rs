//! Node identity hashing.
//!
//! This module provides the [`NodeHasher`] type used to compute a stable
//! SHA-256 identity for description nodes. The identity covers the parent's
//! identity, the node kind and the node's display name, so nodes with equal
//! labels in different places of the tree never share an identity.
//!
//! # Examples
//!
//! ```
//! use storytree::description::NodeKind;
//! use storytree::hasher::NodeHasher;
//!
//! let story = NodeHasher::hash(None, &NodeKind::Story, "Login");
//! let title = "Scenario: Valid user";
//! let scenario = NodeHasher::hash(Some(story.as_str()), &NodeKind::Scenario, title);
//! assert_eq!(story.len(), 64);
//! assert_ne!(story, scenario);
//! ```

use sha2::{Digest, Sha256};

use crate::description::NodeKind;

/// Computes stable digests for description nodes.
pub struct NodeHasher;

impl NodeHasher {
    /// Calculate the identity of a node below `parent`.
    #[must_use]
    pub fn hash(parent: Option<&str>, kind: &NodeKind, display_name: &str) -> String {
        let mut hasher = Sha256::new();
        Self::hash_parent(&mut hasher, parent);
        Self::hash_kind(&mut hasher, kind);
        Self::update_with_len(&mut hasher, display_name.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn hash_parent(hasher: &mut Sha256, parent: Option<&str>) {
        match parent {
            Some(id) => {
                hasher.update(b"1");
                Self::update_with_len(hasher, id.as_bytes());
            }
            None => hasher.update(b"0"),
        }
    }

    fn hash_kind(hasher: &mut Sha256, kind: &NodeKind) {
        match kind {
            NodeKind::Story => hasher.update(b"story"),
            NodeKind::Scenario => hasher.update(b"scn"),
            NodeKind::ExampleRow => hasher.update(b"row"),
            NodeKind::CompositeStep => hasher.update(b"comp"),
            NodeKind::Step { .. } => hasher.update(b"step"),
            NodeKind::GivenStory { path } => {
                hasher.update(b"given");
                Self::update_with_len(hasher, path.as_bytes());
            }
        }
    }

    fn update_with_len(hasher: &mut Sha256, bytes: &[u8]) {
        let len = bytes.len();
        hasher.update(format!("{len}:").as_bytes());
        hasher.update(bytes);
    }
}
