//! Item rendering and per-item key handling.

use crossterm::event::KeyEvent;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use sift_core::Command;

use crate::item::Item;
use crate::key::KeyMap;
use crate::list::Message;
use crate::runeutil::{self, ELLIPSIS};

/// Trait for custom list item rendering.
///
/// The list asks the delegate for its row geometry when sizing the viewport,
/// and for lines when drawing each visible item. Every item must render to
/// exactly [`height`](ItemDelegate::height) lines.
///
/// # Example
/// ```ignore
/// struct TaskDelegate;
/// impl ItemDelegate<Task> for TaskDelegate {
///     fn height(&self) -> usize { 1 }
///     fn spacing(&self) -> usize { 0 }
///     fn render(&self, task: &Task, _index: usize, selected: bool, _matches: &[usize], _width: u16) -> Vec<Line<'static>> {
///         let check = if task.done { "✓" } else { " " };
///         let style = if selected {
///             Style::default().fg(Color::Cyan)
///         } else {
///             Style::default()
///         };
///         vec![Line::styled(format!("[{}] {}", check, task.title), style)]
///     }
/// }
/// ```
pub trait ItemDelegate<I: Item>: Send {
    /// Rows one item occupies.
    fn height(&self) -> usize;

    /// Blank rows between items.
    fn spacing(&self) -> usize;

    /// Render one item.
    /// - `index`: position in the available sequence
    /// - `matches`: char indices of the filter value that matched the query
    /// - `width`: available width in columns
    fn render(
        &self,
        item: &I,
        index: usize,
        selected: bool,
        matches: &[usize],
        width: u16,
    ) -> Vec<Line<'static>>;

    /// Handle a key the list did not consume.
    fn update(&mut self, _key: &KeyEvent, _selected: Option<&I>) -> Command<Message<I>> {
        Command::none()
    }

    /// Bindings to merge into the list's help, if the delegate has any.
    fn key_map(&self) -> Option<&dyn KeyMap> {
        None
    }
}

/// Styles used by [`DefaultDelegate`].
#[derive(Debug, Clone)]
pub struct DelegateStyle {
    pub normal_title: Style,
    pub normal_description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    /// Patched onto characters that matched the filter.
    pub filter_match: Style,
    /// Drawn in front of the selected item; other items get matching padding.
    pub selected_symbol: String,
}

impl Default for DelegateStyle {
    fn default() -> Self {
        Self {
            normal_title: Style::default(),
            normal_description: Style::default().fg(Color::DarkGray),
            selected_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected_description: Style::default().fg(Color::Cyan),
            filter_match: Style::default().add_modifier(Modifier::UNDERLINED),
            selected_symbol: "▸ ".to_string(),
        }
    }
}

/// Renders [`Item::filter_value`] as the title and, when enabled,
/// [`Item::description`] as a dimmed second line.
#[derive(Debug, Clone)]
pub struct DefaultDelegate {
    show_description: bool,
    spacing: usize,
    style: DelegateStyle,
}

impl Default for DefaultDelegate {
    fn default() -> Self {
        Self {
            show_description: true,
            spacing: 1,
            style: DelegateStyle::default(),
        }
    }
}

impl DefaultDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the description line. Hiding it makes items one row tall.
    pub fn with_description(mut self, show: bool) -> Self {
        self.show_description = show;
        self
    }

    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_style(mut self, style: DelegateStyle) -> Self {
        self.style = style;
        self
    }

    fn prefix(&self, selected: bool) -> String {
        if selected {
            self.style.selected_symbol.clone()
        } else {
            " ".repeat(runeutil::display_width(&self.style.selected_symbol))
        }
    }
}

impl<I: Item> ItemDelegate<I> for DefaultDelegate {
    fn height(&self) -> usize {
        if self.show_description {
            2
        } else {
            1
        }
    }

    fn spacing(&self) -> usize {
        self.spacing
    }

    fn render(
        &self,
        item: &I,
        _index: usize,
        selected: bool,
        matches: &[usize],
        width: u16,
    ) -> Vec<Line<'static>> {
        let (title_style, desc_style) = if selected {
            (self.style.selected_title, self.style.selected_description)
        } else {
            (self.style.normal_title, self.style.normal_description)
        };
        let prefix = self.prefix(selected);
        let room = (width as usize).saturating_sub(runeutil::display_width(&prefix));

        let mut title = vec![Span::styled(prefix.clone(), title_style)];
        title.extend(highlight(
            &runeutil::truncate(item.filter_value(), room, ELLIPSIS),
            matches,
            title_style,
            title_style.patch(self.style.filter_match),
        ));
        let mut lines = vec![Line::from(title)];

        if self.show_description {
            let desc = item.description().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(prefix, desc_style),
                Span::styled(runeutil::truncate(desc, room, ELLIPSIS), desc_style),
            ]));
        }
        lines
    }
}

/// Split `text` into runs of matched and unmatched characters.
fn highlight(text: &str, matches: &[usize], base: Style, matched: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;
    for (i, c) in text.chars().enumerate() {
        let is_match = matches.binary_search(&i).is_ok();
        if is_match != run_matched && !run.is_empty() {
            let style = if run_matched { matched } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = is_match;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, if run_matched { matched } else { base }));
    }
    spans
}
