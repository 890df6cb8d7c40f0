//! Tree nodes, balance tags and the AVL rotation primitives.
//!
//! Every child link owns its subtree outright (`Option<Box<Node>>`), so a
//! rotation is a sequence of ownership moves. All functions here take a
//! subtree root by value and hand back the (possibly new) root.

// =============================================================================
// Balance Definition
// =============================================================================

/// Which side of a node, if any, is one level taller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Balance {
    /// The left subtree is one level taller than the right one.
    LeftHeavy,
    /// Both subtrees have the same height.
    Balanced,
    /// The right subtree is one level taller than the left one.
    RightHeavy,
}

/// How the height of a subtree changed during one insert or remove step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum HeightChange {
    Unchanged,
    Grew,
    Shrank,
}

// =============================================================================
// Node Definition
// =============================================================================

/// An owned link to a subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure for the AVL tree.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) balance: Balance,
}

impl<K, V> Node<K, V> {
    /// Creates a boxed leaf.
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            balance: Balance::Balanced,
        })
    }

    /// Consumes the node, returning its entry and both children.
    pub(crate) fn into_parts(self) -> ((K, V), Link<K, V>, Link<K, V>) {
        ((self.key, self.value), self.left, self.right)
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    /// Single rotation for a node whose left subtree is two levels taller
    /// and whose left child does not lean right.
    ///
    /// The left child becomes the subtree root. If the child was
    /// `Balanced` (only possible after a deletion) the old root keeps
    /// leaning left and the child leans right; otherwise both end up
    /// `Balanced`.
    pub(crate) fn rotate_left_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.left.take() else {
            return self;
        };
        self.left = child.right.take();
        if child.balance == Balance::Balanced {
            self.balance = Balance::LeftHeavy;
            child.balance = Balance::RightHeavy;
        } else {
            self.balance = Balance::Balanced;
            child.balance = Balance::Balanced;
        }
        child.right = Some(self);
        child
    }

    /// Mirror image of [`rotate_left_left`](Self::rotate_left_left).
    pub(crate) fn rotate_right_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.right.take() else {
            return self;
        };
        self.right = child.left.take();
        if child.balance == Balance::Balanced {
            self.balance = Balance::RightHeavy;
            child.balance = Balance::LeftHeavy;
        } else {
            self.balance = Balance::Balanced;
            child.balance = Balance::Balanced;
        }
        child.left = Some(self);
        child
    }

    /// Double rotation for a node whose left child leans right.
    ///
    /// The left child's right child (the pivot) becomes the subtree root.
    pub(crate) fn rotate_left_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.left.take() else {
            return self;
        };
        let Some(mut pivot) = child.right.take() else {
            self.left = Some(child);
            return self;
        };
        child.right = pivot.left.take();
        self.left = pivot.right.take();
        let (root_balance, child_balance) = match pivot.balance {
            Balance::LeftHeavy => (Balance::RightHeavy, Balance::Balanced),
            Balance::Balanced => (Balance::Balanced, Balance::Balanced),
            Balance::RightHeavy => (Balance::Balanced, Balance::LeftHeavy),
        };
        self.balance = root_balance;
        child.balance = child_balance;
        pivot.balance = Balance::Balanced;
        pivot.left = Some(child);
        pivot.right = Some(self);
        pivot
    }

    /// Mirror image of [`rotate_left_right`](Self::rotate_left_right).
    pub(crate) fn rotate_right_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.right.take() else {
            return self;
        };
        let Some(mut pivot) = child.left.take() else {
            self.right = Some(child);
            return self;
        };
        child.left = pivot.right.take();
        self.right = pivot.left.take();
        let (root_balance, child_balance) = match pivot.balance {
            Balance::RightHeavy => (Balance::LeftHeavy, Balance::Balanced),
            Balance::Balanced => (Balance::Balanced, Balance::Balanced),
            Balance::LeftHeavy => (Balance::Balanced, Balance::RightHeavy),
        };
        self.balance = root_balance;
        child.balance = child_balance;
        pivot.balance = Balance::Balanced;
        pivot.left = Some(self);
        pivot.right = Some(child);
        pivot
    }

    /// Restores balance when the left side is two levels taller.
    ///
    /// Returns the new root and whether the subtree got shorter than it
    /// was while overweight, which is the case unless the left child was
    /// `Balanced`.
    fn fix_left_overweight(self: Box<Self>) -> (Box<Self>, bool) {
        match self.left.as_ref().map(|child| child.balance) {
            Some(Balance::RightHeavy) => (self.rotate_left_right(), true),
            Some(Balance::LeftHeavy) => (self.rotate_left_left(), true),
            Some(Balance::Balanced) => (self.rotate_left_left(), false),
            None => (self, false),
        }
    }

    /// Restores balance when the right side is two levels taller.
    fn fix_right_overweight(self: Box<Self>) -> (Box<Self>, bool) {
        match self.right.as_ref().map(|child| child.balance) {
            Some(Balance::LeftHeavy) => (self.rotate_right_left(), true),
            Some(Balance::RightHeavy) => (self.rotate_right_right(), true),
            Some(Balance::Balanced) => (self.rotate_right_right(), false),
            None => (self, false),
        }
    }

    // =========================================================================
    // Balance Tables
    // =========================================================================

    /// Updates the balance tag after the left subtree grew by one level.
    pub(crate) fn left_grew(mut self: Box<Self>) -> (Box<Self>, HeightChange) {
        match self.balance {
            Balance::Balanced => {
                self.balance = Balance::LeftHeavy;
                (self, HeightChange::Grew)
            }
            Balance::RightHeavy => {
                self.balance = Balance::Balanced;
                (self, HeightChange::Unchanged)
            }
            Balance::LeftHeavy => (self.fix_left_overweight().0, HeightChange::Unchanged),
        }
    }

    /// Updates the balance tag after the right subtree grew by one level.
    pub(crate) fn right_grew(mut self: Box<Self>) -> (Box<Self>, HeightChange) {
        match self.balance {
            Balance::Balanced => {
                self.balance = Balance::RightHeavy;
                (self, HeightChange::Grew)
            }
            Balance::LeftHeavy => {
                self.balance = Balance::Balanced;
                (self, HeightChange::Unchanged)
            }
            Balance::RightHeavy => (self.fix_right_overweight().0, HeightChange::Unchanged),
        }
    }

    /// Updates the balance tag after the left subtree shrank by one level.
    pub(crate) fn left_shrank(mut self: Box<Self>) -> (Box<Self>, HeightChange) {
        match self.balance {
            Balance::LeftHeavy => {
                self.balance = Balance::Balanced;
                (self, HeightChange::Shrank)
            }
            Balance::Balanced => {
                self.balance = Balance::RightHeavy;
                (self, HeightChange::Unchanged)
            }
            Balance::RightHeavy => {
                let (node, shortened) = self.fix_right_overweight();
                (node, if shortened { HeightChange::Shrank } else { HeightChange::Unchanged })
            }
        }
    }

    /// Updates the balance tag after the right subtree shrank by one level.
    pub(crate) fn right_shrank(mut self: Box<Self>) -> (Box<Self>, HeightChange) {
        match self.balance {
            Balance::RightHeavy => {
                self.balance = Balance::Balanced;
                (self, HeightChange::Shrank)
            }
            Balance::Balanced => {
                self.balance = Balance::LeftHeavy;
                (self, HeightChange::Unchanged)
            }
            Balance::LeftHeavy => {
                let (node, shortened) = self.fix_left_overweight();
                (node, if shortened { HeightChange::Shrank } else { HeightChange::Unchanged })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
