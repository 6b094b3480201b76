//! Document canvas: the live, editable copy of the document.
//!
//! Two copies of the document exist: the controller's authoritative string and
//! the canvas's live markup. External changes flow in through `sync_from`; user
//! edits flow out through `user_input`. A user edit sets a one-shot flag so the
//! next sync pass does not re-apply a stale echo over it.

use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: u16 = 50;
pub const ZOOM_MAX: u16 = 150;
pub const ZOOM_STEP: u16 = 10;
pub const ZOOM_DEFAULT: u16 = 100;

/// Presentational scale in percent. Never touches the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zoom {
    percent: u16,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            percent: ZOOM_DEFAULT,
        }
    }
}

impl Zoom {
    pub fn zoom_in(&mut self) -> u16 {
        self.percent = (self.percent + ZOOM_STEP).min(ZOOM_MAX);
        self.percent
    }

    pub fn zoom_out(&mut self) -> u16 {
        self.percent = self.percent.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
        self.percent
    }

    pub fn percent(&self) -> u16 {
        self.percent
    }

    pub fn scale(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    AlignLeft,
    AlignCenter,
    AlignRight,
}

impl FormatCommand {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            FormatCommand::Bold => ("<b>", "</b>"),
            FormatCommand::Italic => ("<i>", "</i>"),
            FormatCommand::Underline => ("<u>", "</u>"),
            FormatCommand::AlignLeft => (r#"<div style="text-align: left;">"#, "</div>"),
            FormatCommand::AlignCenter => (r#"<div style="text-align: center;">"#, "</div>"),
            FormatCommand::AlignRight => (r#"<div style="text-align: right;">"#, "</div>"),
        }
    }
}

/// Byte range into the live markup, `start <= end`, both on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    live: String,
    /// Set by `user_input`, consumed by the next `sync_from`.
    edited_here: bool,
    selection: Option<Selection>,
    zoom: Zoom,
}

impl Canvas {
    pub fn new(initial: &str) -> Self {
        Self {
            live: initial.to_string(),
            ..Self::default()
        }
    }

    pub fn live(&self) -> &str {
        &self.live
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    /// One reconciliation pass against the authoritative content.
    /// Returns true when the live markup was overwritten.
    pub fn sync_from(&mut self, authoritative: &str) -> bool {
        if self.edited_here {
            self.edited_here = false;
            return false;
        }
        if self.live == authoritative {
            return false;
        }
        self.live = authoritative.to_string();
        self.selection = None;
        true
    }

    /// Records a user edit and hands the serialized markup back for the controller to adopt.
    pub fn user_input(&mut self, markup: String) -> String {
        self.edited_here = true;
        self.live.clone_from(&markup);
        if let Some(sel) = self.selection {
            self.selection = Some(self.clamp(sel.start, sel.end));
        }
        markup
    }

    pub fn select(&mut self, start: usize, end: usize) -> Selection {
        let selection = self.clamp(start, end);
        self.selection = Some(selection);
        selection
    }

    /// Applies `command` to the live selection. Returns false when there is nothing selected.
    /// The authoritative content only sees the result on the next `user_input`.
    pub fn apply_format(&mut self, command: FormatCommand) -> bool {
        let Some(sel) = self.selection.filter(|s| !s.is_empty()) else {
            return false;
        };
        let (open, close) = command.tags();

        let mut markup = String::with_capacity(self.live.len() + open.len() + close.len());
        markup.push_str(&self.live[..sel.start]);
        markup.push_str(open);
        markup.push_str(&self.live[sel.start..sel.end]);
        markup.push_str(close);
        markup.push_str(&self.live[sel.end..]);
        self.live = markup;

        self.selection = Some(Selection {
            start: sel.start,
            end: sel.end + open.len() + close.len(),
        });
        true
    }

    fn clamp(&self, start: usize, end: usize) -> Selection {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Selection {
            start: floor_char_boundary(&self.live, start),
            end: floor_char_boundary(&self.live, end),
        }
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_change_overwrites_live() {
        let mut canvas = Canvas::new("<p>old</p>");
        assert!(canvas.sync_from("<p>new</p>"));
        assert_eq!(canvas.live(), "<p>new</p>");
        assert!(!canvas.sync_from("<p>new</p>"));
    }

    #[test]
    fn test_user_edit_suppresses_exactly_one_sync() {
        let mut canvas = Canvas::new("<p>a</p>");
        let adopted = canvas.user_input("<p>ab</p>".to_string());
        assert_eq!(adopted, "<p>ab</p>");

        // Stale echo of the pre-edit content is ignored once...
        assert!(!canvas.sync_from("<p>a</p>"));
        assert_eq!(canvas.live(), "<p>ab</p>");

        // ...and the flag does not linger.
        assert!(canvas.sync_from("<p>external</p>"));
        assert_eq!(canvas.live(), "<p>external</p>");
    }

    #[test]
    fn test_keystroke_before_external_update_is_reflected_wins() {
        let mut canvas = Canvas::new("<p>start</p>");
        let external = "<p>template</p>"; // adopted upstream, not yet reflected here

        let authoritative = canvas.user_input("<p>start!</p>".to_string());
        // The late pass for the external update must not clobber the edit.
        assert!(!canvas.sync_from(external));
        canvas.sync_from(&authoritative);

        assert_eq!(canvas.live(), "<p>start!</p>");
        assert_eq!(canvas.live(), authoritative);
    }

    #[test]
    fn test_zoom_is_clamped_to_bounds() {
        let mut zoom = Zoom::default();
        for _ in 0..10 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.percent(), ZOOM_MAX);
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.percent(), ZOOM_MIN);
        assert!((zoom.scale() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bold_wraps_selection_in_live_only() {
        let mut canvas = Canvas::new("<p>Hello world</p>");
        canvas.select(9, 14);
        assert!(canvas.apply_format(FormatCommand::Bold));
        assert_eq!(canvas.live(), "<p>Hello <b>world</b></p>");
        assert_eq!(canvas.selection(), Some(Selection { start: 9, end: 21 }));
    }

    #[test]
    fn test_align_center_wraps_in_styled_div() {
        let mut canvas = Canvas::new("Title");
        canvas.select(0, 5);
        canvas.apply_format(FormatCommand::AlignCenter);
        assert_eq!(canvas.live(), r#"<div style="text-align: center;">Title</div>"#);
    }

    #[test]
    fn test_format_without_selection_is_noop() {
        let mut canvas = Canvas::new("<p>x</p>");
        assert!(!canvas.apply_format(FormatCommand::Italic));
        canvas.select(3, 3);
        assert!(!canvas.apply_format(FormatCommand::Italic));
        assert_eq!(canvas.live(), "<p>x</p>");
    }

    #[test]
    fn test_select_orders_and_clamps_to_char_boundaries() {
        let mut canvas = Canvas::new("héllo");
        // 'é' occupies bytes 1..3
        assert_eq!(canvas.select(99, 2), Selection { start: 1, end: 6 });
    }

    #[test]
    fn test_external_sync_clears_selection() {
        let mut canvas = Canvas::new("<p>abc</p>");
        canvas.select(3, 6);
        canvas.sync_from("<p>filled</p>");
        assert!(canvas.selection().is_none());
    }
}
