use std::borrow::Cow;
use std::fmt;

/// Opaque handle of an element on a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Computed `display` value of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Display(Cow<'static, str>);

impl Display {
    pub const NONE: Self = Self(Cow::Borrowed("none"));
    pub const BLOCK: Self = Self(Cow::Borrowed("block"));

    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == "none"
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Inline style properties the animator writes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StyleProperty {
    Display,
    Overflow,
    Height,
    PaddingTop,
    PaddingBottom,
    BorderTopWidth,
    BorderBottomWidth,
    MarginTop,
    MarginBottom,
}

impl StyleProperty {
    /// Every property that contributes to the vertical size of the box.
    pub const BOX: [Self; 7] = [
        Self::Height,
        Self::PaddingTop,
        Self::PaddingBottom,
        Self::BorderTopWidth,
        Self::BorderBottomWidth,
        Self::MarginTop,
        Self::MarginBottom,
    ];
}

/// Vertical box metrics in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub height: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub border_top_width: f64,
    pub border_bottom_width: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl BoxMetrics {
    pub const ZERO: Self = Self {
        height: 0.0,
        padding_top: 0.0,
        padding_bottom: 0.0,
        border_top_width: 0.0,
        border_bottom_width: 0.0,
        margin_top: 0.0,
        margin_bottom: 0.0,
    };

    /// Content height only, with no padding, border or margin.
    #[must_use]
    pub const fn with_height(height: f64) -> Self {
        Self { height, ..Self::ZERO }
    }

    /// Value of one box property. Non-box properties read as zero.
    #[must_use]
    pub const fn get(&self, property: StyleProperty) -> f64 {
        match property {
            StyleProperty::Height => self.height,
            StyleProperty::PaddingTop => self.padding_top,
            StyleProperty::PaddingBottom => self.padding_bottom,
            StyleProperty::BorderTopWidth => self.border_top_width,
            StyleProperty::BorderBottomWidth => self.border_bottom_width,
            StyleProperty::MarginTop => self.margin_top,
            StyleProperty::MarginBottom => self.margin_bottom,
            StyleProperty::Display | StyleProperty::Overflow => 0.0,
        }
    }

    pub const fn set(&mut self, property: StyleProperty, value: f64) {
        match property {
            StyleProperty::Height => self.height = value,
            StyleProperty::PaddingTop => self.padding_top = value,
            StyleProperty::PaddingBottom => self.padding_bottom = value,
            StyleProperty::BorderTopWidth => self.border_top_width = value,
            StyleProperty::BorderBottomWidth => self.border_bottom_width = value,
            StyleProperty::MarginTop => self.margin_top = value,
            StyleProperty::MarginBottom => self.margin_bottom = value,
            StyleProperty::Display | StyleProperty::Overflow => {},
        }
    }

    /// Total vertical space the element occupies.
    #[must_use]
    pub fn outer_height(&self) -> f64 {
        StyleProperty::BOX.iter().map(|p| self.get(*p)).sum()
    }

    /// Linear interpolation; `t` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = Self::ZERO;
        for property in StyleProperty::BOX {
            let (a, b) = (self.get(property), to.get(property));
            out.set(property, (b - a).mul_add(t, a));
        }
        out
    }
}

/// Rendering capabilities the animator needs from its host.
///
/// A browser binding maps these onto an element's inline style and computed style; tests use an
/// in-memory fake.
pub trait RenderSurface: Send + Sync + 'static {
    /// Whether `element` exists and belongs to the render tree.
    fn is_attached(&self, element: ElementId) -> bool;

    /// Resolved `display` value, honouring inline overrides and stylesheets.
    fn computed_display(&self, element: ElementId) -> Display;

    /// Box metrics as currently rendered. A hidden element measures as zero.
    fn current_metrics(&self, element: ElementId) -> BoxMetrics;

    fn set_style(&self, element: ElementId, property: StyleProperty, value: &str);

    fn remove_style(&self, element: ElementId, property: StyleProperty);

    /// Forces a synchronous layout so subsequent writes start from the flushed state.
    fn flush_layout(&self, element: ElementId);
}

/// Formats a pixel length for an inline style.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Parses a `"12.5px"` inline length.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px").and_then(|v| v.trim().parse().ok())
}
