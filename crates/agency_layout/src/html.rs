//! HTML serialization and structural snapshots
//!
//! In-flight animation values are written as inline `opacity`, `transform`
//! and height styles so a serialized frame shows exactly what is on screen.
//! Nodes hidden at the current viewport carry the `hidden` attribute.

use std::fmt::Write;

use agency_animation::Pose;
use indexmap::IndexMap;
use serde::Serialize;

use crate::element::{ElementKind, InputKind};
use crate::render_state::RenderState;
use crate::tree::{NodeId, RenderTree};

/// Serialize the whole tree
pub fn render_html<M>(tree: &RenderTree<M>, state: &RenderState) -> String {
    let mut out = String::new();
    write_node(tree, state, tree.root(), &mut out);
    out
}

/// Serialize one subtree
pub fn render_node<M>(tree: &RenderTree<M>, state: &RenderState, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, state, node, &mut out);
    out
}

/// Inline style for a pose; `None` when it renders like the natural pose
pub fn pose_style(pose: &Pose) -> Option<String> {
    if pose.is_natural() {
        return None;
    }
    let mut style = String::new();
    let opacity = pose.resolved_opacity();
    if (opacity - 1.0).abs() > 1e-4 {
        let _ = write!(style, "opacity:{};", round(opacity));
    }

    let (tx, ty) = pose.resolved_translate();
    let (sx, sy) = pose.resolved_scale();
    let rotate = pose.resolved_rotate();
    let mut transform = Vec::new();
    if tx.abs() > 1e-4 || ty.abs() > 1e-4 {
        transform.push(format!("translate({}px,{}px)", round(tx), round(ty)));
    }
    if (sx - 1.0).abs() > 1e-4 || (sy - 1.0).abs() > 1e-4 {
        if (sx - sy).abs() < 1e-4 {
            transform.push(format!("scale({})", round(sx)));
        } else {
            transform.push(format!("scale({},{})", round(sx), round(sy)));
        }
    }
    if rotate.abs() > 1e-4 {
        transform.push(format!("rotate({}deg)", round(rotate)));
    }
    if !transform.is_empty() {
        let _ = write!(style, "transform:{};", transform.join(" "));
    }

    let height = pose.resolved_height();
    if (height - 1.0).abs() > 1e-4 {
        let _ = write!(style, "overflow:hidden;max-height:{}%;", round(height * 100.0));
    }

    (!style.is_empty()).then_some(style)
}

fn round(value: f32) -> f32 {
    // `+ 0.0` folds negative zero
    (value * 1000.0).round() / 1000.0 + 0.0
}

fn attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(
        out,
        " {}=\"{}\"",
        name,
        html_escape::encode_double_quoted_attribute(value)
    );
}

fn write_node<M>(tree: &RenderTree<M>, state: &RenderState, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let kind = node.kind();
    let tag = kind.tag();

    out.push('<');
    out.push_str(tag);
    if let Some(dom_id) = node.dom_id() {
        attr(out, "id", dom_id);
    }
    if let Some(class) = node.class() {
        attr(out, "class", class);
    }
    match kind {
        ElementKind::Link { to } => attr(out, "href", to),
        ElementKind::Button { submit } => attr(out, "type", if *submit { "submit" } else { "button" }),
        ElementKind::Input {
            name,
            kind: input_kind,
            required,
        } => {
            attr(out, "name", name);
            if *input_kind != InputKind::Textarea {
                attr(out, "type", input_kind.as_str());
                attr(out, "value", node.value());
            }
            if *required {
                out.push_str(" required");
            }
        }
        ElementKind::Image { src, alt } => {
            attr(out, "src", src);
            attr(out, "alt", alt);
        }
        ElementKind::Svg { .. } => {
            attr(out, "viewBox", "0 0 24 24");
            attr(out, "fill", "none");
            attr(out, "stroke", "currentColor");
        }
        _ => {}
    }
    if let Some(style) = state.pose(id).and_then(pose_style) {
        attr(out, "style", &style);
    }
    if !node.visibility().shows_at(tree.viewport().width) {
        out.push_str(" hidden");
    }

    out.push('>');
    let is_void = match kind {
        ElementKind::Image { .. } => true,
        ElementKind::Input { kind, .. } => *kind != InputKind::Textarea,
        _ => false,
    };
    if is_void {
        return;
    }

    match kind {
        ElementKind::Svg { path } => {
            out.push_str("<path");
            attr(out, "d", path);
            out.push_str("/>");
        }
        ElementKind::Input { .. } => {
            out.push_str(&html_escape::encode_text(node.value()));
        }
        _ => {}
    }
    if let Some(text) = node.text() {
        out.push_str(&html_escape::encode_text(text));
    }
    for child in node.children() {
        write_node(tree, state, *child, out);
    }

    let _ = write!(out, "</{}>", tag);
}

// ============================================================================
// Snapshots
// ============================================================================

/// Serializable view of a subtree, used by diagnostics and assertions
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
    pub visible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Snapshot `node` and everything below it
pub fn snapshot<M>(tree: &RenderTree<M>, state: &RenderState, node: NodeId) -> Option<NodeSnapshot> {
    let n = tree.get(node)?;
    let mut attrs = IndexMap::new();
    if let Some(key) = n.key() {
        attrs.insert("key", key.to_string());
    }
    if let Some(dom_id) = n.dom_id() {
        attrs.insert("id", dom_id.to_string());
    }
    if let Some(class) = n.class() {
        attrs.insert("class", class.to_string());
    }
    match n.kind() {
        ElementKind::Link { to } => {
            attrs.insert("href", to.clone());
        }
        ElementKind::Input { name, .. } => {
            attrs.insert("name", name.clone());
            attrs.insert("value", n.value().to_string());
        }
        ElementKind::Image { src, alt } => {
            attrs.insert("src", src.clone());
            attrs.insert("alt", alt.clone());
        }
        ElementKind::Svg { path } => {
            attrs.insert("d", path.clone());
        }
        _ => {}
    }

    Some(NodeSnapshot {
        tag: n.kind().tag(),
        text: n.text().map(str::to_string),
        attrs,
        pose: state.pose(node).cloned(),
        visible: tree.is_visible(node),
        children: n
            .children()
            .iter()
            .filter_map(|child| snapshot(tree, state, *child))
            .collect(),
    })
}
