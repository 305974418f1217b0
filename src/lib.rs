//! metrolayout is a shelf-packing layout engine for "metro tile" mosaics.
//!
//! Items are sized as fractions of a measured container (`"1/3"` of its width,
//! `"1/6"` of its height, ...) and packed into rows of variable-height blocks.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: `LayoutDocument` (JSON or built in code) is validated; malformed
//!    fractions and missing item sizes are rejected here and nowhere else.
//! 2. **Size**: `compute_sizes` resolves each item to pixels as
//!    `ceil(measured * fraction)`; gutters are resolved the same way.
//! 3. **Place**: `layout_pass` drives a [`PlacementEngine`] over the sized items and
//!    returns one rectangle per non-collapsed item.
//! 4. **Preview** (optional): `render_preview` paints the result for debugging.
//!
//! Placement is pure and deterministic: every pass starts from a single free shelf
//! and never fails. No state survives between passes.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod layout;
mod render;

pub use config::fraction::Fraction;
pub use config::model::{ItemSpec, LayoutDocument, Visibility};
pub use foundation::core::{Container, Edges, Gutters, PixelRect, PixelSize, Rect};
pub use foundation::error::{Axis, MetroError, MetroResult};
pub use layout::shelf::{MergePolicy, PlacementEngine, Shelf, ShelfSlot};
pub use layout::sizing::{ItemFractions, compute_size, compute_sizes, resolve_gutters};
pub use layout::solver::{LayoutOutput, Placement, SizedItem, layout_pass, solve_layout};
pub use render::preview::{DebugPalette, MAX_PREVIEW_PIXELS, PreviewOptions, render_preview};
