use crate::{
    animation::keyframes::{Interp, PropValue, TemporalEase},
    foundation::core::{Rgb01, Vec2},
    foundation::error::AvgColorResult,
};

/// Handle to a node created by a [`SceneHost`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Animatable properties every node exposes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Node position, pixels.
    Position,
    /// Anchor point, pixels.
    Anchor,
    /// Scale, percent per axis.
    Scale,
    /// Opacity, percent.
    Opacity,
    /// Text content of a text node.
    SourceText,
}

impl Property {
    /// Stable snake_case name used in errors and hashing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Anchor => "anchor",
            Self::Scale => "scale",
            Self::Opacity => "opacity",
            Self::SourceText => "source_text",
        }
    }

    /// Whether `value` has the variant this property stores.
    pub fn accepts(self, value: &PropValue) -> bool {
        matches!(
            (self, value),
            (Self::Position | Self::Anchor | Self::Scale, PropValue::Vec2(_))
                | (Self::Opacity, PropValue::Scalar(_))
                | (Self::SourceText, PropValue::Text(_))
        )
    }

    /// Static value of a freshly created node; `None` for text content.
    pub fn default_value(self) -> Option<PropValue> {
        match self {
            Self::Position | Self::Anchor => Some(PropValue::Vec2(Vec2::ZERO)),
            Self::Scale => Some(PropValue::Vec2(Vec2::new(100.0, 100.0))),
            Self::Opacity => Some(PropValue::Scalar(100.0)),
            Self::SourceText => None,
        }
    }
}

/// Rounded rectangle in node-local space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectSpec {
    /// Center.
    pub position: Vec2,
    /// Width and height.
    pub size: Vec2,
    /// Corner radius.
    pub roundness: f64,
}

/// Outline paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Line width, pixels.
    pub width: f64,
    /// Line color.
    pub color: Rgb01,
}

/// Rectangles sharing one fill and stroke.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeGroup {
    /// Member rectangles.
    pub rects: Vec<RectSpec>,
    /// Fill, if any.
    pub fill: Option<Rgb01>,
    /// Stroke, if any.
    pub stroke: Option<Stroke>,
}

/// Static vector content of a shape node.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeContent {
    /// Groups, painted in order.
    pub groups: Vec<ShapeGroup>,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Justification {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Initial content and styling of a text node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Initial text.
    pub text: String,
    /// Font family name.
    pub font: String,
    /// Size in points.
    pub font_size: f64,
    /// Glyph fill.
    pub fill: Rgb01,
    /// Glyph outline, if any.
    pub stroke: Option<Stroke>,
    /// Paint the outline on top of the fill.
    pub stroke_over_fill: bool,
    /// Alignment.
    pub justification: Justification,
}

/// Editor-facing flags that do not affect the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeFlags {
    /// Hidden from the editor when the composition hides shy nodes.
    pub shy: bool,
    /// Not editable.
    pub locked: bool,
}

/// What a node draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Nothing; a transform parent.
    Null,
    /// Vector rectangles.
    Shape(ShapeContent),
    /// A text line.
    Text(TextStyle),
}

/// Named, duration-bearing annotation on the composition timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    /// Label shown on the timeline.
    pub name: String,
    /// Start, seconds.
    pub time: f64,
    /// Length, seconds.
    pub duration: f64,
}

/// Scene mutation and marker API the generator writes through.
///
/// Every method may reject the mutation; callers propagate the error and
/// abandon the composition.
pub trait SceneHost {
    /// Create an empty transform node.
    fn add_null(&mut self, name: &str) -> AvgColorResult<NodeId>;

    /// Create a shape node with static vector content.
    fn add_shape(&mut self, name: &str, content: ShapeContent) -> AvgColorResult<NodeId>;

    /// Create a text node; its `SourceText` starts at `style.text`.
    fn add_text(&mut self, name: &str, style: TextStyle) -> AvgColorResult<NodeId>;

    /// Parent `child` under `parent`.
    fn set_parent(&mut self, child: NodeId, parent: NodeId) -> AvgColorResult<()>;

    /// Replace the editor flags of a node.
    fn set_flags(&mut self, node: NodeId, flags: NodeFlags) -> AvgColorResult<()>;

    /// Set the static (un-keyed) value of a property.
    fn set_value(&mut self, node: NodeId, prop: Property, value: PropValue) -> AvgColorResult<()>;

    /// Current value of a property at `time`, keyed or static.
    fn value_at_time(&self, node: NodeId, prop: Property, time: f64) -> AvgColorResult<PropValue>;

    /// Write a keyframe.
    fn set_value_at_time(
        &mut self,
        node: NodeId,
        prop: Property,
        time: f64,
        value: PropValue,
    ) -> AvgColorResult<()>;

    /// Number of keyframes on a property.
    fn num_keys(&self, node: NodeId, prop: Property) -> AvgColorResult<usize>;

    /// Set in/out interpolation of the key at zero-based `index`.
    fn set_interpolation_at_key(
        &mut self,
        node: NodeId,
        prop: Property,
        index: usize,
        interp_in: Interp,
        interp_out: Interp,
    ) -> AvgColorResult<()>;

    /// Set in/out temporal ease of the key at zero-based `index`.
    fn set_temporal_ease_at_key(
        &mut self,
        node: NodeId,
        prop: Property,
        index: usize,
        ease_in: TemporalEase,
        ease_out: TemporalEase,
    ) -> AvgColorResult<()>;

    /// Attach a marker to the composition timeline.
    fn add_marker(&mut self, marker: Marker) -> AvgColorResult<()>;
}
