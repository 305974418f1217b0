use crate::{
    config::model::{LayoutDocument, Visibility},
    foundation::core::{Container, Gutters, PixelRect, PixelSize},
    foundation::error::MetroResult,
    layout::shelf::{MergePolicy, PlacementEngine},
    layout::sizing::compute_size,
};

/// An item with its resolved pixel size, ready for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedItem {
    pub size: PixelSize,
    pub visibility: Visibility,
}

impl SizedItem {
    pub fn visible(width: i32, height: i32) -> Self {
        Self {
            size: PixelSize::new(width, height),
            visibility: Visibility::Visible,
        }
    }
}

/// Final bounds of one non-collapsed item.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Position of the item in the input list.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub visibility: Visibility,
    pub size: PixelSize,
    pub rect: PixelRect,
}

/// Result of solving a [`LayoutDocument`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutOutput {
    pub container: Container,
    pub gutters: Gutters,
    /// Placements in input order; collapsed items are absent.
    pub placements: Vec<Placement>,
    /// Lowest placed edge plus bottom padding. May exceed the container height.
    pub content_height: i32,
}

impl LayoutOutput {
    /// Placement for the item at input position `index`.
    pub fn placement(&self, index: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.index == index)
    }

    pub fn placement_by_id(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id.as_deref() == Some(id))
    }

    pub fn rects(&self) -> impl Iterator<Item = PixelRect> + '_ {
        self.placements.iter().map(|p| p.rect)
    }

    pub fn to_json_string_pretty(&self) -> MetroResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Place already-sized items into `container`, from scratch.
///
/// Returns one entry per input item; collapsed items yield `None` and leave the
/// free space untouched.
#[tracing::instrument(skip(items), fields(item_count = items.len()))]
pub fn layout_pass(
    container: Container,
    gutters: Gutters,
    policy: MergePolicy,
    items: &[SizedItem],
) -> Vec<Option<PixelRect>> {
    let mut engine = PlacementEngine::new(gutters, policy);
    engine.reset(
        container.width_px(),
        container.padding.left,
        container.padding.top,
    );

    let rects = items
        .iter()
        .map(|item| {
            item.visibility
                .takes_space()
                .then(|| engine.place_next(item.size))
        })
        .collect::<Vec<_>>();

    tracing::debug!(shelves = engine.shelves().len(), "layout pass finished");
    rects
}

/// Validate, size and place every item of `doc`.
#[tracing::instrument(skip(doc), fields(item_count = doc.items.len()))]
pub fn solve_layout(doc: &LayoutDocument) -> MetroResult<LayoutOutput> {
    doc.validate()?;

    let container = doc.container;
    let gutters = doc.gutters();
    let fractions = doc.item_fractions()?;

    let sized = doc
        .items
        .iter()
        .zip(&fractions)
        .map(|(item, &f)| SizedItem {
            size: if item.visibility.takes_space() {
                compute_size(container, f)
            } else {
                PixelSize::default()
            },
            visibility: item.visibility,
        })
        .collect::<Vec<_>>();

    let rects = layout_pass(container, gutters, doc.merge_policy, &sized);

    let placements = doc
        .items
        .iter()
        .zip(sized)
        .zip(rects)
        .enumerate()
        .filter_map(|(index, ((item, s), rect))| {
            rect.map(|rect| Placement {
                index,
                id: item.id.clone(),
                visibility: s.visibility,
                size: s.size,
                rect,
            })
        })
        .collect::<Vec<_>>();

    let lowest = placements
        .iter()
        .map(|p| p.rect.bottom)
        .max()
        .unwrap_or(container.padding.top);
    let content_height = lowest.saturating_add(container.padding.bottom);

    Ok(LayoutOutput {
        container,
        gutters,
        placements,
        content_height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
