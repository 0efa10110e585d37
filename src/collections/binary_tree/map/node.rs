use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::{Deref, DerefMut};

/// An optional, owned subtree. The root of a map is a Branch, as are the children of every Node.
pub(crate) struct Branch<K: Ord, V>(pub Option<Box<Node<K, V>>>);

pub(crate) struct Node<K: Ord, V> {
    pub left: Branch<K, V>,
    pub right: Branch<K, V>,
    pub key: K,
    pub value: V,
}

impl<K: Ord, V> Node<K, V> {
    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    pub const fn tuple(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K: Ord, V> Branch<K, V> {
    pub const fn empty() -> Branch<K, V> {
        Branch(None)
    }

    /// Inserts the entry below this branch, replacing and returning the value of an existing entry
    /// with an equal key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Every walk down the tree is a loop rather than a recursive call, so the depth of a
        // degenerate tree is bounded by the heap, not the stack.
        let mut cursor = &mut self.0;
        while let Some(node) = cursor {
            match key.cmp(&node.key) {
                Ordering::Less => cursor = &mut node.left.0,
                Ordering::Greater => cursor = &mut node.right.0,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            }
        }

        *cursor = Some(Box::new(Node {
            left: Branch::empty(),
            right: Branch::empty(),
            key,
            value,
        }));
        None
    }

    /// Compares `key` against the node at the top of this branch, if there is one.
    fn compare<Q>(&self, key: &Q) -> Option<Ordering>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.as_ref().map(|node| key.cmp(node.key.borrow()))
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self;
        loop {
            match cursor.compare(key)? {
                Ordering::Less => cursor = &mut cursor.0.as_mut()?.left,
                Ordering::Greater => cursor = &mut cursor.0.as_mut()?.right,
                Ordering::Equal => return cursor.take_root(),
            }
        }
    }

    /// Unlinks the node at the top of this branch, keeping both of its subtrees. A node with two
    /// children is replaced by the smallest node of its right subtree.
    fn take_root(&mut self) -> Option<(K, V)> {
        let mut node = self.0.take()?;

        self.0 = match node.right.take_first_node() {
            Some(mut successor) => {
                successor.left = mem::take(&mut node.left);
                successor.right = mem::take(&mut node.right);
                Some(successor)
            },
            None => node.left.0.take(),
        };

        Some(node.into_tuple())
    }

    /// Unlinks the leftmost node below this branch, putting its right subtree in its place.
    fn take_first_node(&mut self) -> Option<Box<Node<K, V>>> {
        let mut cursor = self;
        while cursor.0.as_ref()?.left.is_some() {
            cursor = &mut cursor.0.as_mut()?.left;
        }

        let mut node = cursor.0.take()?;
        cursor.0 = node.right.0.take();
        Some(node)
    }

    /// Unlinks the rightmost node below this branch, putting its left subtree in its place.
    fn take_last_node(&mut self) -> Option<Box<Node<K, V>>> {
        let mut cursor = self;
        while cursor.0.as_ref()?.right.is_some() {
            cursor = &mut cursor.0.as_mut()?.right;
        }

        let mut node = cursor.0.take()?;
        cursor.0 = node.left.0.take();
        Some(node)
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self;
        while let Some(node) = &cursor.0 {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = &node.left,
                Ordering::Greater => cursor = &node.right,
                Ordering::Equal => return Some(node.tuple()),
            }
        }
        None
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self;
        loop {
            match cursor.compare(key)? {
                Ordering::Less => cursor = &mut cursor.0.as_mut()?.left,
                Ordering::Greater => cursor = &mut cursor.0.as_mut()?.right,
                Ordering::Equal => return cursor.0.as_mut().map(|node| &mut node.value),
            }
        }
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        let mut node = self.0.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(node.tuple())
    }

    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        self.take_first_node().map(|node| node.into_tuple())
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        let mut node = self.0.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(node.tuple())
    }

    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        self.take_last_node().map(|node| node.into_tuple())
    }

    /// Returns the number of nodes on the longest path from this branch to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = self.0.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }
}

impl<K: Ord, V> Drop for Branch<K, V> {
    fn drop(&mut self) {
        // Detach every child before its parent is dropped, otherwise dropping a Box<Node> drops
        // its subtrees recursively, one stack frame per level.
        let mut stack: Vec<Box<Node<K, V>>> = self.0.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.0.take());
            stack.extend(node.right.0.take());
        }
    }
}

impl<K: Ord, V> Default for Branch<K, V> {
    fn default() -> Self {
        Branch::empty()
    }
}

impl<K: Ord, V> Deref for Branch<K, V> {
    type Target = Option<Box<Node<K, V>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Ord, V> DerefMut for Branch<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Ord, V> From<Option<Box<Node<K, V>>>> for Branch<K, V> {
    fn from(value: Option<Box<Node<K, V>>>) -> Self {
        Branch(value)
    }
}

impl<K: Ord + Debug, V: Debug> Debug for Branch<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(node) => write!(
                f,
                "{}\n({:?}: {:?})\n{}",
                format!("{:?}", node.left)
                    .lines()
                    .map(|l| String::from("┌    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n"),
                node.key,
                node.value,
                format!("{:?}", node.right)
                    .lines()
                    .map(|l| String::from("└    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            None => write!(f, "-"),
        }
    }
}
