//! Free-space tracking for metro shelf packing.
//!
//! The engine keeps an ordered list of [`Shelf`] regions: horizontal strips of
//! unused space, each anchored at a `top` level. Every placement consumes the front
//! of the lowest shelf, seeds a new shelf under the placed item and then recombines
//! shelves that meet at the same level.

use crate::foundation::core::{Gutters, PixelRect, PixelSize};

/// A horizontal strip of remaining placeable space.
///
/// `width` is always > 0 while the shelf is part of the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shelf {
    pub left: i32,
    pub top: i32,
    pub width: i32,
}

impl Shelf {
    pub fn new(left: i32, top: i32, width: i32) -> Self {
        Self { left, top, width }
    }

    pub fn right(self) -> i32 {
        self.left.saturating_add(self.width)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Rule deciding which equal-level shelves are recombined after a placement.
pub enum MergePolicy {
    /// Merge shelves at the same `top` only when they touch, allowing a gap of at
    /// most one horizontal gutter. The merged shelf spans both, gap included.
    #[default]
    Contiguous,
    /// Merge every shelf at the same `top` regardless of gaps. The survivor
    /// starts at the leftmost edge and its width is the sum of both widths.
    ///
    /// Gaps are ignored rather than spanned, so the merged shelf can cover a
    /// taller neighbouring column and later items may overlap earlier ones.
    SameLevel,
}

impl MergePolicy {
    /// Join two shelves into one, or `None` when this policy keeps them apart.
    pub fn join(self, a: Shelf, b: Shelf, gutters: Gutters) -> Option<Shelf> {
        if a.top != b.top {
            return None;
        }
        match self {
            MergePolicy::SameLevel => Some(Shelf {
                left: a.left.min(b.left),
                top: a.top,
                width: a.width.saturating_add(b.width),
            }),
            MergePolicy::Contiguous => {
                let (first, second) = if a.left <= b.left { (a, b) } else { (b, a) };
                let gap = second.left.saturating_sub(first.right());
                if gap > gutters.horizontal {
                    return None;
                }
                let right = first.right().max(second.right());
                Some(Shelf {
                    left: first.left,
                    top: first.top,
                    width: right.saturating_sub(first.left),
                })
            }
        }
    }
}

/// Region picked by [`PlacementEngine::select_region`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShelfSlot {
    /// A shelf from the active set, at `index`.
    Active { index: usize, shelf: Shelf },
    /// Synthetic full-width shelf at the padding origin, used when the active set
    /// is empty. It is not part of the active set.
    Fallback(Shelf),
}

impl ShelfSlot {
    pub fn shelf(self) -> Shelf {
        match self {
            ShelfSlot::Active { shelf, .. } | ShelfSlot::Fallback(shelf) => shelf,
        }
    }
}

/// Shelf-packing placement engine.
///
/// One engine owns one active shelf collection. A pass is [`reset`](Self::reset)
/// followed by one [`place_next`](Self::place_next) per item, in order.
#[derive(Clone, Debug)]
pub struct PlacementEngine {
    shelves: Vec<Shelf>,
    origin: Shelf,
    gutters: Gutters,
    policy: MergePolicy,
}

impl PlacementEngine {
    pub fn new(gutters: Gutters, policy: MergePolicy) -> Self {
        Self {
            shelves: Vec::new(),
            origin: Shelf::new(0, 0, 0),
            gutters,
            policy,
        }
    }

    pub fn gutters(&self) -> Gutters {
        self.gutters
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Active shelves in iteration order.
    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    /// Start a new pass with a single shelf spanning the container.
    pub fn reset(&mut self, container_width: i32, padding_left: i32, padding_top: i32) {
        self.origin = Shelf::new(padding_left, padding_top, container_width);
        self.shelves.clear();
        self.shelves.push(self.origin);
    }

    /// Lowest shelf; the first one wins ties.
    pub fn select_region(&self) -> ShelfSlot {
        let lowest = self
            .shelves
            .iter()
            .enumerate()
            .fold(None::<(usize, Shelf)>, |best, (index, &shelf)| match best {
                Some((_, b)) if b.top <= shelf.top => best,
                _ => Some((index, shelf)),
            });
        match lowest {
            Some((index, shelf)) => ShelfSlot::Active { index, shelf },
            None => ShelfSlot::Fallback(self.origin),
        }
    }

    /// Place an item at the front of `slot` and update the active set.
    ///
    /// A slot that no longer matches the active set (stale index) is placed like a
    /// fallback: the item lands at its position but no active shelf is consumed.
    pub fn place(&mut self, size: PixelSize, slot: ShelfSlot) -> PixelRect {
        let region = slot.shelf();
        let rect = PixelRect::from_origin_size(region.left, region.top, size);

        if let ShelfSlot::Active { index, shelf } = slot
            && self.shelves.get(index) == Some(&shelf)
        {
            let consumed = size.width.saturating_add(self.gutters.horizontal);
            if consumed < shelf.width {
                let s = &mut self.shelves[index];
                s.left = s.left.saturating_add(consumed);
                s.width -= consumed;
            } else {
                // Slivers no wider than a gutter are dropped with the shelf.
                self.shelves.remove(index);
            }
        }

        if size.width > 0 {
            self.shelves.push(Shelf {
                left: rect.left,
                top: rect.bottom.saturating_add(self.gutters.vertical),
                width: size.width,
            });
        }

        self.merge();
        tracing::trace!(?rect, shelves = self.shelves.len(), "placed item");
        rect
    }

    pub fn place_next(&mut self, size: PixelSize) -> PixelRect {
        let slot = self.select_region();
        self.place(size, slot)
    }

    /// Recombine shelves according to the merge policy until none can be joined.
    pub fn merge(&mut self) {
        if self.shelves.len() <= 1 {
            return;
        }
        loop {
            let (next, changed) = merge_pass(&self.shelves, self.policy, self.gutters);
            self.shelves = next;
            if !changed {
                break;
            }
        }
    }
}

/// One merge sweep producing a new collection. A survivor keeps the position of
/// the first shelf it absorbed.
fn merge_pass(shelves: &[Shelf], policy: MergePolicy, gutters: Gutters) -> (Vec<Shelf>, bool) {
    let mut out = Vec::<Shelf>::with_capacity(shelves.len());
    let mut changed = false;
    for &shelf in shelves {
        let joined = out
            .iter()
            .enumerate()
            .find_map(|(idx, &kept)| policy.join(kept, shelf, gutters).map(|j| (idx, j)));
        match joined {
            Some((idx, merged)) => {
                tracing::debug!(?merged, "merged shelves");
                out[idx] = merged;
                changed = true;
            }
            None => out.push(shelf),
        }
    }
    (out, changed)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/shelf.rs"]
mod tests;
