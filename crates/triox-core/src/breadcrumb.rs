//! Breadcrumb trail derived from a [`PathStack`].
//!
//! The trail is always rebuilt from the stack; nothing here is stored or
//! patched in place.

use crate::path::PathStack;

/// Label of the synthetic root crumb.
pub const HOME_LABEL: &str = "Home";

/// One clickable step of the trail.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Breadcrumb {
    /// Display label
    pub label: String,
    /// Stack length after jumping to this crumb
    pub target_depth: usize,
    /// The current directory; not navigable
    pub active: bool,
}

impl Breadcrumb {
    /// Depth to truncate to when clicked, `None` for the active crumb.
    pub fn action(&self) -> Option<usize> {
        (!self.active).then_some(self.target_depth)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    crumbs: Vec<Breadcrumb>,
}

impl BreadcrumbTrail {
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Breadcrumb> {
        self.crumbs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Breadcrumb> {
        self.crumbs.get(index)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.crumbs.iter().map(|c| c.label.as_str()).collect()
    }

    /// Truncate `stack` to the crumb at `index`.
    ///
    /// Returns `false` (and leaves the stack alone) for the active crumb or
    /// an out-of-range index.
    pub fn jump(&self, index: usize, stack: &mut PathStack) -> bool {
        match self.crumbs.get(index).and_then(Breadcrumb::action) {
            Some(depth) => {
                stack.truncate(depth);
                true
            }
            None => false,
        }
    }
}

impl IntoIterator for BreadcrumbTrail {
    type Item = Breadcrumb;
    type IntoIter = std::vec::IntoIter<Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.crumbs.into_iter()
    }
}

/// Build the trail for `stack`: Home, then one crumb per segment.
pub fn build_trail(stack: &PathStack) -> BreadcrumbTrail {
    let last = stack.len();
    let home = Breadcrumb {
        label: HOME_LABEL.to_string(),
        target_depth: 0,
        active: last == 0,
    };

    let crumbs = std::iter::once(home)
        .chain(stack.segments().iter().enumerate().map(|(idx, segment)| {
            let depth = idx + 1;
            Breadcrumb {
                label: segment.clone(),
                target_depth: depth,
                active: depth == last,
            }
        }))
        .collect();

    BreadcrumbTrail { crumbs }
}
