//! Ticket Composer State
//!
//! Everything the placement step edits: the QR box, its selection flag, the
//! text labels and the picker colour. Rendering lives in
//! `components::ticket_composer`; this module only holds the rules.

use crate::models::{QrPosition, TextNode};

/// Side of the square ticket stage, in CSS pixels
pub const STAGE_SIZE: f64 = 280.0;
pub const QR_DEFAULT_SIZE: f64 = 80.0;
pub const QR_MIN_SIZE: f64 = 10.0;
/// Where new QR images and text labels start
pub const DEFAULT_POSITION: QrPosition = QrPosition { x: 50.0, y: 50.0 };
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Resize handle positions on the QR box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    pub fn css_class(self) -> &'static str {
        match self {
            Corner::TopLeft => "handle top-left",
            Corner::TopRight => "handle top-right",
            Corner::BottomLeft => "handle bottom-left",
            Corner::BottomRight => "handle bottom-right",
        }
    }
}

/// Anything on the stage that can be dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageElement {
    Qr,
    Text(u32),
    Handle(Corner),
}

/// Square QR image placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrBox {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Default for QrBox {
    fn default() -> Self {
        Self {
            x: DEFAULT_POSITION.x,
            y: DEFAULT_POSITION.y,
            size: QR_DEFAULT_SIZE,
        }
    }
}

impl QrBox {
    pub fn position(&self) -> QrPosition {
        QrPosition { x: self.x, y: self.y }
    }

    pub fn moved(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Drag `corner` by (dx, dy) keeping the opposite corner fixed.
    /// The result is always square: side = max(width, height).
    pub fn resized(self, corner: Corner, dx: f64, dy: f64) -> Self {
        let right = self.x + self.size;
        let bottom = self.y + self.size;

        let (width, height) = match corner {
            Corner::TopLeft => (self.size - dx, self.size - dy),
            Corner::TopRight => (self.size + dx, self.size - dy),
            Corner::BottomLeft => (self.size - dx, self.size + dy),
            Corner::BottomRight => (self.size + dx, self.size + dy),
        };
        let size = width.max(height).max(QR_MIN_SIZE);

        let (x, y) = match corner {
            Corner::TopLeft => (right - size, bottom - size),
            Corner::TopRight => (self.x, bottom - size),
            Corner::BottomLeft => (right - size, self.y),
            Corner::BottomRight => (self.x, self.y),
        };
        Self { x, y, size }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState {
    pub qr: QrBox,
    /// Whether the resize handles are attached to the QR image
    pub qr_selected: bool,
    /// Rendering order is insertion order
    pub text_nodes: Vec<TextNode>,
    pub selected_text: Option<u32>,
    /// Current picker colour, used for new labels
    pub color: String,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            qr: QrBox::default(),
            qr_selected: false,
            text_nodes: Vec::new(),
            selected_text: None,
            color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl ComposerState {
    pub fn toggle_qr_selected(&mut self) {
        self.qr_selected = !self.qr_selected;
    }

    /// Id the next label will get: max + 1, or 1 when there are none
    pub fn next_text_id(&self) -> u32 {
        self.text_nodes.iter().map(|n| n.id).max().map_or(1, |max| max + 1)
    }

    /// Add a label seeded with `title` at the default spot. Returns its id.
    pub fn add_text(&mut self, title: &str) -> u32 {
        let id = self.next_text_id();
        self.text_nodes.push(TextNode {
            id,
            text: title.to_string(),
            x: DEFAULT_POSITION.x,
            y: DEFAULT_POSITION.y,
            font_size: DEFAULT_FONT_SIZE,
            is_editing: false,
            color: self.color.clone(),
        });
        id
    }

    pub fn select_text(&mut self, id: u32) {
        self.selected_text = Some(id);
    }

    /// Remove the selected label and clear the selection. No-op without one.
    pub fn delete_selected_text(&mut self) -> Option<TextNode> {
        let id = self.selected_text.take()?;
        let pos = self.text_nodes.iter().position(|n| n.id == id)?;
        Some(self.text_nodes.remove(pos))
    }

    pub fn toggle_text_editing(&mut self, id: u32) {
        if let Some(node) = self.text_nodes.iter_mut().find(|n| n.id == id) {
            node.is_editing = !node.is_editing;
        }
    }

    /// Set the picker colour and recolour the selected label, if any
    pub fn change_color(&mut self, color: &str) {
        self.color = color.to_string();
        if let Some(id) = self.selected_text {
            if let Some(node) = self.text_nodes.iter_mut().find(|n| n.id == id) {
                node.color = color.to_string();
            }
        }
    }

    pub fn move_text(&mut self, id: u32, dx: f64, dy: f64) {
        if let Some(node) = self.text_nodes.iter_mut().find(|n| n.id == id) {
            node.x += dx;
            node.y += dy;
        }
    }

    /// QR box as it should be drawn while `element` is dragged by (dx, dy)
    pub fn preview_qr(&self, element: Option<StageElement>, dx: f64, dy: f64) -> QrBox {
        match element {
            Some(StageElement::Qr) => self.qr.moved(dx, dy),
            Some(StageElement::Handle(corner)) => self.qr.resized(corner, dx, dy),
            _ => self.qr,
        }
    }

    /// Commit a finished drag
    pub fn apply_drag(&mut self, element: StageElement, dx: f64, dy: f64) {
        match element {
            StageElement::Qr => self.qr = self.qr.moved(dx, dy),
            StageElement::Handle(corner) => self.qr = self.qr.resized(corner, dx, dy),
            StageElement::Text(id) => self.move_text(id, dx, dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_text_on_empty_list() {
        let mut state = ComposerState::default();
        state.add_text("Birthday");

        assert_eq!(
            state.text_nodes,
            vec![TextNode {
                id: 1,
                text: "Birthday".to_string(),
                x: 50.0,
                y: 50.0,
                font_size: 20.0,
                is_editing: false,
                color: "#000000".to_string(),
            }]
        );
    }

    #[test]
    fn test_text_ids_follow_max_plus_one() {
        let mut state = ComposerState::default();
        for _ in 0..3 {
            let before = state.text_nodes.iter().map(|n| n.id).max();
            let id = state.add_text("t");
            assert_eq!(id, before.map_or(1, |m| m + 1));
        }

        state.select_text(2);
        state.delete_selected_text();
        assert_eq!(state.add_text("t"), 4);

        let ids: Vec<_> = state.text_nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_delete_removes_selected_and_clears_selection() {
        let mut state = ComposerState::default();
        state.add_text("a");
        state.add_text("b");
        state.select_text(1);

        let removed = state.delete_selected_text().expect("node removed");
        assert_eq!(removed.id, 1);
        assert_eq!(state.selected_text, None);
        assert_eq!(state.text_nodes.len(), 1);
        assert_eq!(state.text_nodes[0].id, 2);
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut state = ComposerState::default();
        state.add_text("a");
        let before = state.clone();

        assert_eq!(state.delete_selected_text(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_color_change_only_touches_selected_node() {
        let mut state = ComposerState::default();
        state.add_text("a");
        state.add_text("b");
        state.select_text(2);
        state.change_color("#ff0000");

        assert_eq!(state.text_nodes[0].color, "#000000");
        assert_eq!(state.text_nodes[1].color, "#ff0000");
        // New labels pick up the picker colour
        state.add_text("c");
        assert_eq!(state.text_nodes[2].color, "#ff0000");
    }

    #[test]
    fn test_color_change_without_selection_sets_default_only() {
        let mut state = ComposerState::default();
        state.add_text("a");
        state.change_color("#00ff00");
        assert_eq!(state.text_nodes[0].color, "#000000");
        assert_eq!(state.color, "#00ff00");
    }

    #[test]
    fn test_double_click_toggles_editing() {
        let mut state = ComposerState::default();
        state.add_text("a");
        state.toggle_text_editing(1);
        assert!(state.text_nodes[0].is_editing);
        state.toggle_text_editing(1);
        assert!(!state.text_nodes[0].is_editing);
    }

    #[test]
    fn test_qr_selection_toggles() {
        let mut state = ComposerState::default();
        state.toggle_qr_selected();
        assert!(state.qr_selected);
        state.toggle_qr_selected();
        assert!(!state.qr_selected);
    }

    #[test]
    fn test_qr_drag_end_updates_position() {
        let mut state = ComposerState::default();
        state.apply_drag(StageElement::Qr, 30.0, -20.0);
        assert_eq!(state.qr.position(), QrPosition { x: 80.0, y: 30.0 });
        assert_eq!(state.qr.size, QR_DEFAULT_SIZE);
    }

    #[test]
    fn test_resize_is_always_square() {
        let qr = QrBox::default();

        let grown = qr.resized(Corner::BottomRight, 40.0, 10.0);
        assert_eq!(grown, QrBox { x: 50.0, y: 50.0, size: 120.0 });

        let from_top_left = qr.resized(Corner::TopLeft, -10.0, -30.0);
        assert_eq!(from_top_left, QrBox { x: 20.0, y: 20.0, size: 110.0 });

        let from_top_right = qr.resized(Corner::TopRight, 20.0, 0.0);
        assert_eq!(from_top_right, QrBox { x: 50.0, y: 30.0, size: 100.0 });
    }

    #[test]
    fn test_resize_has_minimum_side() {
        let shrunk = QrBox::default().resized(Corner::BottomLeft, 200.0, -200.0);
        assert_eq!(shrunk.size, QR_MIN_SIZE);
        assert_eq!(shrunk.x + shrunk.size, 130.0);
    }

    #[test]
    fn test_text_drag_moves_only_that_node() {
        let mut state = ComposerState::default();
        state.add_text("a");
        state.add_text("b");
        state.apply_drag(StageElement::Text(2), 10.0, 5.0);
        assert_eq!((state.text_nodes[0].x, state.text_nodes[0].y), (50.0, 50.0));
        assert_eq!((state.text_nodes[1].x, state.text_nodes[1].y), (60.0, 55.0));
    }

    #[test]
    fn test_preview_does_not_commit() {
        let state = ComposerState::default();
        let preview = state.preview_qr(Some(StageElement::Qr), 5.0, 5.0);
        assert_eq!(preview.x, 55.0);
        assert_eq!(state.qr, QrBox::default());
        assert_eq!(state.preview_qr(Some(StageElement::Text(1)), 5.0, 5.0), state.qr);
    }
}
