use std::collections::BTreeMap;

use crate::{
    animation::keyframes::{Interp, PropValue, TemporalEase, Track},
    foundation::core::{Canvas, Fps, Rgb01},
    foundation::error::{AvgColorError, AvgColorResult},
    host::scene::{
        Marker, NodeFlags, NodeId, NodeKind, Property, SceneHost, ShapeContent, TextStyle,
    },
};

/// Static value plus keyframes of one property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyState {
    /// Used while the track is empty.
    pub value: PropValue,
    /// Keyframes, possibly none.
    pub track: Track,
}

/// One node of the composition graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Handle; equals the node's index.
    pub id: NodeId,
    /// Display name, unique by construction.
    pub name: String,
    /// What the node draws.
    pub kind: NodeKind,
    /// Transform parent.
    pub parent: Option<NodeId>,
    /// Editor flags.
    pub flags: NodeFlags,
    /// Properties this node exposes.
    pub props: BTreeMap<Property, PropertyState>,
}

impl Node {
    fn new(id: NodeId, name: &str, kind: NodeKind) -> Self {
        let mut props = BTreeMap::new();
        for prop in [
            Property::Position,
            Property::Anchor,
            Property::Scale,
            Property::Opacity,
        ] {
            if let Some(value) = prop.default_value() {
                props.insert(
                    prop,
                    PropertyState {
                        value,
                        track: Track::default(),
                    },
                );
            }
        }
        if let NodeKind::Text(style) = &kind {
            props.insert(
                Property::SourceText,
                PropertyState {
                    value: PropValue::Text(style.text.clone()),
                    track: Track::default(),
                },
            );
        }
        Self {
            id,
            name: name.to_owned(),
            kind,
            parent: None,
            flags: NodeFlags::default(),
            props,
        }
    }
}

/// In-memory scene host: one composition with its node graph, keyframe
/// tracks and markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    /// Unique within a project.
    pub name: String,
    /// Frame size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Timeline length, seconds.
    pub duration: f64,
    /// Background color.
    pub background: Rgb01,
    /// Hide nodes flagged shy in the editor.
    pub hide_shy_layers: bool,
    nodes: Vec<Node>,
    markers: Vec<Marker>,
}

impl Composition {
    /// Empty composition on a white background.
    pub fn new(name: impl Into<String>, canvas: Canvas, fps: Fps, duration: f64) -> Self {
        Self {
            name: name.into(),
            canvas,
            fps,
            duration,
            background: Rgb01::WHITE,
            hide_shy_layers: true,
            nodes: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// First node with this name.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Keyframe track of a property, if the node exposes it.
    pub fn track(&self, node: NodeId, prop: Property) -> Option<&Track> {
        self.node(node)?.props.get(&prop).map(|s| &s.track)
    }

    /// Keys across every node and property.
    pub fn keyframe_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| n.props.values())
            .map(|s| s.track.len())
            .sum()
    }

    /// Whole frames the timeline covers.
    pub fn duration_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.duration)
    }

    /// Evaluate a property at `time`.
    pub fn sample(&self, node: NodeId, prop: Property, time: f64) -> AvgColorResult<PropValue> {
        self.value_at_time(node, prop, time)
    }

    /// Pretty-printed JSON of the whole composition.
    pub fn to_json_pretty(&self) -> AvgColorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push_node(&mut self, name: &str, kind: NodeKind) -> AvgColorResult<NodeId> {
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| AvgColorError::host("too many nodes"))?;
        self.nodes.push(Node::new(id, name, kind));
        Ok(id)
    }

    fn node_mut(&mut self, id: NodeId) -> AvgColorResult<&mut Node> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or_else(|| AvgColorError::host(format!("unknown node {}", id.0)))
    }

    fn state(&self, node: NodeId, prop: Property) -> AvgColorResult<&PropertyState> {
        let n = self
            .node(node)
            .ok_or_else(|| AvgColorError::host(format!("unknown node {}", node.0)))?;
        n.props.get(&prop).ok_or_else(|| {
            AvgColorError::host(format!("node '{}' has no {} property", n.name, prop.name()))
        })
    }

    fn state_mut(&mut self, node: NodeId, prop: Property) -> AvgColorResult<&mut PropertyState> {
        let n = self.node_mut(node)?;
        let name = n.name.clone();
        n.props.get_mut(&prop).ok_or_else(|| {
            AvgColorError::host(format!("node '{name}' has no {} property", prop.name()))
        })
    }

    fn check_value(prop: Property, value: &PropValue) -> AvgColorResult<()> {
        if !prop.accepts(value) {
            return Err(AvgColorError::host(format!(
                "{} does not accept a {} value",
                prop.name(),
                value.kind_name()
            )));
        }
        Ok(())
    }
}

impl SceneHost for Composition {
    fn add_null(&mut self, name: &str) -> AvgColorResult<NodeId> {
        self.push_node(name, NodeKind::Null)
    }

    fn add_shape(&mut self, name: &str, content: ShapeContent) -> AvgColorResult<NodeId> {
        self.push_node(name, NodeKind::Shape(content))
    }

    fn add_text(&mut self, name: &str, style: TextStyle) -> AvgColorResult<NodeId> {
        if !(style.font_size > 0.0) {
            return Err(AvgColorError::host("font size must be > 0"));
        }
        self.push_node(name, NodeKind::Text(style))
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) -> AvgColorResult<()> {
        self.node_mut(parent)?;
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(AvgColorError::host(format!(
                    "parenting node {} under {} would form a cycle",
                    child.0, parent.0
                )));
            }
            cursor = self.node(id).and_then(|n| n.parent);
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn set_flags(&mut self, node: NodeId, flags: NodeFlags) -> AvgColorResult<()> {
        self.node_mut(node)?.flags = flags;
        Ok(())
    }

    fn set_value(&mut self, node: NodeId, prop: Property, value: PropValue) -> AvgColorResult<()> {
        Self::check_value(prop, &value)?;
        let state = self.state_mut(node, prop)?;
        if !state.track.is_empty() {
            return Err(AvgColorError::host(format!(
                "{} is keyed; set a value at a time instead",
                prop.name()
            )));
        }
        state.value = value;
        Ok(())
    }

    fn value_at_time(&self, node: NodeId, prop: Property, time: f64) -> AvgColorResult<PropValue> {
        let state = self.state(node, prop)?;
        Ok(state
            .track
            .sample(time)
            .unwrap_or_else(|| state.value.clone()))
    }

    fn set_value_at_time(
        &mut self,
        node: NodeId,
        prop: Property,
        time: f64,
        value: PropValue,
    ) -> AvgColorResult<()> {
        Self::check_value(prop, &value)?;
        self.state_mut(node, prop)?.track.set_at(time, value)
    }

    fn num_keys(&self, node: NodeId, prop: Property) -> AvgColorResult<usize> {
        Ok(self.state(node, prop)?.track.len())
    }

    fn set_interpolation_at_key(
        &mut self,
        node: NodeId,
        prop: Property,
        index: usize,
        interp_in: Interp,
        interp_out: Interp,
    ) -> AvgColorResult<()> {
        self.state_mut(node, prop)?
            .track
            .set_interpolation(index, interp_in, interp_out)
    }

    fn set_temporal_ease_at_key(
        &mut self,
        node: NodeId,
        prop: Property,
        index: usize,
        ease_in: TemporalEase,
        ease_out: TemporalEase,
    ) -> AvgColorResult<()> {
        self.state_mut(node, prop)?
            .track
            .set_temporal_ease(index, ease_in, ease_out)
    }

    fn add_marker(&mut self, marker: Marker) -> AvgColorResult<()> {
        if !(marker.time >= 0.0 && marker.time < self.duration) {
            return Err(AvgColorError::host(format!(
                "marker '{}' at {}s lies outside the composition ({}s)",
                marker.name, marker.time, self.duration
            )));
        }
        if !(marker.duration >= 0.0) {
            return Err(AvgColorError::host("marker duration must be >= 0"));
        }
        self.markers.push(marker);
        Ok(())
    }
}

/// Explicit project handle owning every generated composition by name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    compositions: Vec<Composition>,
}

impl Project {
    /// Empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a composition, replacing any existing one with the same name.
    pub fn insert(&mut self, comp: Composition) {
        match self.compositions.iter_mut().find(|c| c.name == comp.name) {
            Some(slot) => *slot = comp,
            None => self.compositions.push(comp),
        }
    }

    /// Composition by name.
    pub fn get(&self, name: &str) -> Option<&Composition> {
        self.compositions.iter().find(|c| c.name == name)
    }

    /// Compositions in insertion order.
    pub fn compositions(&self) -> &[Composition] {
        &self.compositions
    }

    /// Number of compositions.
    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    /// Whether no composition was added.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }

    /// Pretty-printed JSON of every composition.
    pub fn to_json_pretty(&self) -> AvgColorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/composition.rs"]
mod tests;
