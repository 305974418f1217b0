use crate::{
    config::fraction::Fraction,
    foundation::core::{Container, Gutters, PixelSize},
};

/// Validated width/height fractions of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemFractions {
    pub width: Fraction,
    pub height: Fraction,
}

/// Pixel gutters, each `ceil(fraction * measured dimension)`.
pub fn resolve_gutters(container: Container, horizontal: Fraction, vertical: Fraction) -> Gutters {
    Gutters {
        horizontal: horizontal.of_px(container.width),
        vertical: vertical.of_px(container.height),
    }
}

pub fn compute_size(container: Container, fractions: ItemFractions) -> PixelSize {
    PixelSize {
        width: fractions.width.of_px(container.width),
        height: fractions.height.of_px(container.height),
    }
}

/// Resolve every item's pixel size against the measured container.
///
/// Sizes are relative to the full measured dimensions, padding included.
pub fn compute_sizes(container: Container, items: &[ItemFractions]) -> Vec<PixelSize> {
    items
        .iter()
        .map(|&f| compute_size(container, f))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sizing.rs"]
mod tests;
