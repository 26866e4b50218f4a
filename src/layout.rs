//! Table layout configuration.

use crate::card::DECK_SIZE;
use crate::error::LayoutError;
use crate::geometry::{self, Point, Rect, Size};

/// Dimensions and spacing of the table.
///
/// All positions the engine hands out are derived from these values. Use the
/// builder methods to customize them:
///
/// ```
/// use solrs::LayoutOptions;
///
/// let layout = LayoutOptions::default()
///     .with_card_size(90.0, 130.0)
///     .with_vertical_spacing(25.0)
///     .with_num_stacks(7);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutOptions {
    /// Card width.
    pub card_width: f32,
    /// Card height.
    pub card_height: f32,
    /// Gap between neighbouring columns.
    pub horizontal_spacing: f32,
    /// Offset between consecutive cards of a tableau stack.
    pub vertical_spacing: f32,
    /// Margin between the window edge and the outermost cards.
    pub corner_padding: f32,
    /// Number of tableau stacks.
    pub num_stacks: u8,
    /// Vertical drop window, as a multiple of the card height.
    ///
    /// A release is rejected when the lead card lands this far or further
    /// from its slot on the target stack.
    pub drop_tolerance: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            card_width: 110.0,
            card_height: 160.0,
            horizontal_spacing: 10.0,
            vertical_spacing: 40.0,
            corner_padding: 50.0,
            num_stacks: 7,
            drop_tolerance: 1.0,
        }
    }
}

impl LayoutOptions {
    /// Sets the card dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// use solrs::LayoutOptions;
    ///
    /// let layout = LayoutOptions::default().with_card_size(80.0, 120.0);
    /// assert_eq!(layout.card_width, 80.0);
    /// assert_eq!(layout.card_height, 120.0);
    /// ```
    #[must_use]
    pub const fn with_card_size(mut self, width: f32, height: f32) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    /// Sets the gap between columns.
    #[must_use]
    pub const fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Sets the offset between cards of a stack.
    #[must_use]
    pub const fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Sets the margin around the table.
    #[must_use]
    pub const fn with_corner_padding(mut self, padding: f32) -> Self {
        self.corner_padding = padding;
        self
    }

    /// Sets the number of tableau stacks.
    ///
    /// # Example
    ///
    /// ```
    /// use solrs::LayoutOptions;
    ///
    /// let layout = LayoutOptions::default().with_num_stacks(5);
    /// assert_eq!(layout.num_stacks, 5);
    /// ```
    #[must_use]
    pub const fn with_num_stacks(mut self, stacks: u8) -> Self {
        self.num_stacks = stacks;
        self
    }

    /// Sets the vertical drop window as a multiple of the card height.
    #[must_use]
    pub const fn with_drop_tolerance(mut self, tolerance: f32) -> Self {
        self.drop_tolerance = tolerance;
        self
    }

    /// Multiplies every dimension by `factor`, rounding to whole pixels.
    ///
    /// # Example
    ///
    /// ```
    /// use solrs::LayoutOptions;
    ///
    /// let layout = LayoutOptions::default().with_scale(1.5);
    /// assert_eq!(layout.card_width, 165.0);
    /// assert_eq!(layout.card_height, 240.0);
    /// ```
    #[must_use]
    pub fn with_scale(mut self, factor: f32) -> Self {
        self.card_width = geometry::round(self.card_width * factor);
        self.card_height = geometry::round(self.card_height * factor);
        self.horizontal_spacing = geometry::round(self.horizontal_spacing * factor);
        self.vertical_spacing = geometry::round(self.vertical_spacing * factor);
        self.corner_padding = geometry::round(self.corner_padding * factor);
        self
    }

    /// Checks that the layout can be dealt and rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is out of range or the stacks need more
    /// than 52 cards for the triangular deal.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.card_width.is_finite() && self.card_width > 0.0)
            || !(self.card_height.is_finite() && self.card_height > 0.0)
        {
            return Err(LayoutError::InvalidCardSize);
        }

        let spacings = [
            self.horizontal_spacing,
            self.vertical_spacing,
            self.corner_padding,
        ];
        if spacings.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::NegativeSpacing);
        }

        if self.num_stacks == 0 {
            return Err(LayoutError::NoStacks);
        }
        if self.dealt_cards() > DECK_SIZE {
            return Err(LayoutError::TooManyStacks(self.num_stacks));
        }

        if !(self.drop_tolerance.is_finite() && self.drop_tolerance > 0.0) {
            return Err(LayoutError::InvalidDropTolerance);
        }

        Ok(())
    }

    /// Returns how many cards the triangular deal puts on the tableau.
    #[must_use]
    pub const fn dealt_cards(&self) -> usize {
        let n = self.num_stacks as usize;
        n * (n + 1) / 2
    }

    /// Returns the card size.
    #[must_use]
    pub const fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    /// Returns the rectangle of a card whose top-left corner is `origin`.
    #[must_use]
    pub const fn card_rect(&self, origin: Point) -> Rect {
        Rect::new(origin, self.card_size())
    }

    /// Returns the anchor of the stock pile (top-left corner).
    #[must_use]
    pub const fn stock_origin(&self) -> Point {
        Point::new(self.corner_padding, self.corner_padding)
    }

    /// Returns the anchor of the waste pile, one column right of the stock.
    #[must_use]
    pub fn waste_origin(&self) -> Point {
        Point::new(self.column_x(1), self.corner_padding)
    }

    /// Returns the anchor of the tableau stack at `index`.
    #[must_use]
    pub fn tableau_origin(&self, index: u8) -> Point {
        Point::new(
            self.column_x(index),
            self.corner_padding * 2.0 + self.card_height,
        )
    }

    /// Returns the tableau column nearest to the horizontal coordinate `x`
    /// of a card center, clamped to the configured stacks.
    #[must_use]
    pub fn nearest_column(&self, x: f32) -> u8 {
        let pitch = self.card_width + self.horizontal_spacing;
        let first_center = self.corner_padding + self.card_width / 2.0;
        let slot = geometry::round((x - first_center) / pitch);
        let last = f32::from(self.num_stacks.saturating_sub(1));
        slot.clamp(0.0, last) as u8
    }

    fn column_x(&self, index: u8) -> f32 {
        self.corner_padding + f32::from(index) * (self.card_width + self.horizontal_spacing)
    }
}
