use crate::{
    config::fraction::Fraction,
    foundation::core::{Container, Gutters},
    foundation::error::{Axis, MetroError, MetroResult},
    layout::shelf::MergePolicy,
    layout::sizing::{ItemFractions, resolve_gutters},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete metro layout description.
///
/// A document is pure data that can be:
/// - built programmatically
/// - serialized/deserialized via Serde (JSON)
///
/// Solving a document is performed by [`crate::solve_layout`] (or
/// [`LayoutDocument::solve`]).
pub struct LayoutDocument {
    /// Measured container dimensions and padding.
    pub container: Container,
    /// Horizontal gutter as a fraction of the container width.
    #[serde(default)]
    pub horizontal_divider: Fraction,
    /// Vertical gutter as a fraction of the container height.
    #[serde(default)]
    pub vertical_divider: Fraction,
    /// How equal-level free regions are recombined.
    #[serde(default)]
    pub merge_policy: MergePolicy,
    /// Items in placement order.
    pub items: Vec<ItemSpec>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One block of the mosaic, sized relative to the container.
pub struct ItemSpec {
    /// Optional stable identifier echoed in the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fraction of the container width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Fraction>,
    /// Fraction of the container height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Fraction>,
    /// Whether the item is placed and painted.
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Item visibility.
pub enum Visibility {
    /// Placed and painted.
    #[default]
    Visible,
    /// Placed and occupies space, but not painted.
    Hidden,
    /// Skipped entirely: never measured, never touches a free region.
    Collapsed,
}

impl Visibility {
    pub fn takes_space(self) -> bool {
        !matches!(self, Visibility::Collapsed)
    }
}

impl ItemSpec {
    pub fn new(width: Fraction, height: Fraction) -> Self {
        Self {
            id: None,
            width: Some(width),
            height: Some(height),
            visibility: Visibility::Visible,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Id for diagnostics, falling back to `#index`.
    pub fn label(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{index}"))
    }

    /// Validated width/height fractions; both must be present and positive.
    pub fn fractions(&self, index: usize) -> MetroResult<ItemFractions> {
        let width = self
            .width
            .filter(|f| f.is_positive())
            .ok_or_else(|| MetroError::missing_size_fraction(self.label(index), Axis::Width))?;
        let height = self
            .height
            .filter(|f| f.is_positive())
            .ok_or_else(|| MetroError::missing_size_fraction(self.label(index), Axis::Height))?;
        Ok(ItemFractions { width, height })
    }
}

/// First fraction-valued string in a raw document that fails to parse.
fn first_malformed_fraction(value: &serde_json::Value) -> Option<MetroError> {
    let dividers = ["horizontal_divider", "vertical_divider"]
        .into_iter()
        .filter_map(|key| value.get(key));
    let items = value
        .get("items")
        .and_then(serde_json::Value::as_array)
        .into_iter()
        .flatten()
        .flat_map(|item| {
            ["width", "height"]
                .into_iter()
                .filter_map(move |key| item.get(key))
        });
    dividers
        .chain(items)
        .filter_map(serde_json::Value::as_str)
        .find_map(|s| Fraction::parse(s).err())
}

impl LayoutDocument {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            horizontal_divider: Fraction::ZERO,
            vertical_divider: Fraction::ZERO,
            merge_policy: MergePolicy::default(),
            items: Vec::new(),
        }
    }

    /// Parse a JSON document.
    ///
    /// A fraction string that is not `<int>/<int>` fails with
    /// [`MetroError::MalformedFraction`]; any other decoding problem is
    /// [`MetroError::Serde`].
    pub fn from_json_str(s: &str) -> MetroResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> MetroResult<Self> {
        if let Some(err) = first_malformed_fraction(&value) {
            return Err(err);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_string_pretty(&self) -> MetroResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> MetroResult<()> {
        if self.container.width == 0 || self.container.height == 0 {
            return Err(MetroError::validation(
                "container width/height must be > 0",
            ));
        }
        for (name, f) in [
            ("horizontal_divider", self.horizontal_divider),
            ("vertical_divider", self.vertical_divider),
        ] {
            let r = f.ratio();
            if !(0.0..=1.0).contains(&r) {
                return Err(MetroError::validation(format!(
                    "{name} must be within [0, 1], got {f}"
                )));
            }
        }
        // Every item is checked, collapsed ones included.
        for (idx, item) in self.items.iter().enumerate() {
            item.fractions(idx)?;
        }
        Ok(())
    }

    /// Validated fractions for every item, in input order.
    pub fn item_fractions(&self) -> MetroResult<Vec<ItemFractions>> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| item.fractions(idx))
            .collect()
    }

    pub fn gutters(&self) -> Gutters {
        resolve_gutters(
            self.container,
            self.horizontal_divider,
            self.vertical_divider,
        )
    }

    pub fn solve(&self) -> MetroResult<crate::LayoutOutput> {
        crate::solve_layout(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
