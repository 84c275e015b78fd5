//! Key binding definitions, the key map trait used for help display, and the
//! list's own key map with its eligibility rules.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::filter::FilterState;

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// A human-readable description of the action this binding performs.
    pub description: String,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code (e.g. a character, arrow key, or function key).
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a new binding for a single key combination with the given description.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Create a new binding for multiple key combinations with the given description.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Return whether the given key event matches any of this binding's key combinations.
    /// Always returns `false` when the binding is disabled.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys
            .iter()
            .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    /// Builder form of [`set_enabled`](Self::set_enabled).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Key labels joined with `/`, e.g. `↑/k`.
    pub fn help_key(&self) -> String {
        self.keys
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create a key combination with the Ctrl modifier.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Create a key combination with the Shift modifier.
    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::Left => f.write_str("←"),
            KeyCode::Right => f.write_str("→"),
            KeyCode::PageUp => f.write_str("pgup"),
            KeyCode::PageDown => f.write_str("pgdown"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Trait for types that define key bindings for help display.
///
/// A list delegate can expose one through
/// [`ItemDelegate::key_map`](crate::ItemDelegate::key_map) to contribute its
/// bindings to the list's help.
pub trait KeyMap {
    /// Return a flat list of the most important bindings for the short help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// Return bindings grouped by category for the full help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Configurable key bindings for the list.
///
/// Which bindings are enabled depends on list state; the list recomputes that
/// with [`update_eligibility`](ListKeyMap::update_eligibility) after every
/// change. Override individual fields to customise keys:
///
/// ```ignore
/// use sift_list::key::{Binding, KeyCombination, ListKeyMap};
/// use crossterm::event::KeyCode;
///
/// let mut keys = ListKeyMap::default();
/// keys.filter = Binding::new(KeyCombination::ctrl(KeyCode::Char('f')), "filter");
/// ```
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Select the previous item. Default: Up, k
    pub cursor_up: Binding,
    /// Select the next item. Default: Down, j
    pub cursor_down: Binding,
    /// Jump back one page. Default: PageUp, b
    pub page_up: Binding,
    /// Jump forward one page. Default: PageDown, f
    pub page_down: Binding,
    /// Select the first item. Default: Home, g
    pub go_to_start: Binding,
    /// Select the last item. Default: End, G
    pub go_to_end: Binding,
    /// Swap the selected item with the one above. Default: K
    pub move_up: Binding,
    /// Swap the selected item with the one below. Default: J
    pub move_down: Binding,
    /// Start editing the filter. Default: /
    pub filter: Binding,
    /// Drop an applied filter. Default: Esc
    pub clear_filter: Binding,
    /// Abandon the filter being edited. Default: Esc
    pub cancel_while_filtering: Binding,
    /// Keep the filter being edited. Default: Enter, Tab
    pub accept_while_filtering: Binding,
    /// Expand the help view. Default: ?
    pub show_full_help: Binding,
    /// Collapse the help view. Default: ?
    pub close_full_help: Binding,
    /// Quit. Default: q, Esc
    pub quit: Binding,
    /// Quit from any state. Default: Ctrl+C
    pub force_quit: Binding,
}

/// State that decides which list bindings are usable.
#[derive(Debug, Clone, Copy)]
pub struct Eligibility {
    pub filter_state: FilterState,
    pub has_items: bool,
    pub filtering_enabled: bool,
    pub query_is_empty: bool,
    pub quit_disabled: bool,
}

impl ListKeyMap {
    /// Enable exactly the bindings that make sense for `ctx`.
    ///
    /// While filtering only cancel, accept (with a non-empty query) and force
    /// quit stay live. Otherwise navigation needs items, starting a filter
    /// needs items and filtering enabled, and clearing needs an applied
    /// filter. Help toggles are left to the caller, which knows how many
    /// bindings the help would show.
    pub fn update_eligibility(&mut self, ctx: Eligibility) {
        if ctx.filter_state == FilterState::Filtering {
            for binding in [
                &mut self.cursor_up,
                &mut self.cursor_down,
                &mut self.page_up,
                &mut self.page_down,
                &mut self.go_to_start,
                &mut self.go_to_end,
                &mut self.move_up,
                &mut self.move_down,
                &mut self.filter,
                &mut self.clear_filter,
                &mut self.quit,
                &mut self.show_full_help,
                &mut self.close_full_help,
            ] {
                binding.set_enabled(false);
            }
            self.cancel_while_filtering.set_enabled(true);
            self.accept_while_filtering
                .set_enabled(!ctx.query_is_empty);
            return;
        }

        for binding in [
            &mut self.cursor_up,
            &mut self.cursor_down,
            &mut self.page_up,
            &mut self.page_down,
            &mut self.go_to_start,
            &mut self.go_to_end,
        ] {
            binding.set_enabled(ctx.has_items);
        }
        // Reordering only makes sense on the master sequence.
        let can_move = ctx.has_items && ctx.filter_state == FilterState::Unfiltered;
        self.move_up.set_enabled(can_move);
        self.move_down.set_enabled(can_move);
        self.filter
            .set_enabled(ctx.filtering_enabled && ctx.has_items);
        self.clear_filter
            .set_enabled(ctx.filter_state == FilterState::FilterApplied);
        self.cancel_while_filtering.set_enabled(false);
        self.accept_while_filtering.set_enabled(false);
        self.quit.set_enabled(!ctx.quit_disabled);
    }
}

impl Default for ListKeyMap {
    fn default() -> Self {
        let key = |code| KeyCombination::new(code);
        let ch = |c| KeyCombination::new(KeyCode::Char(c));
        Self {
            cursor_up: Binding::with_keys(vec![key(KeyCode::Up), ch('k')], "up"),
            cursor_down: Binding::with_keys(vec![key(KeyCode::Down), ch('j')], "down"),
            page_up: Binding::with_keys(vec![key(KeyCode::PageUp), ch('b')], "prev page"),
            page_down: Binding::with_keys(vec![key(KeyCode::PageDown), ch('f')], "next page"),
            go_to_start: Binding::with_keys(vec![key(KeyCode::Home), ch('g')], "go to start"),
            go_to_end: Binding::with_keys(vec![key(KeyCode::End), ch('G')], "go to end"),
            move_up: Binding::new(ch('K'), "move item up"),
            move_down: Binding::new(ch('J'), "move item down"),
            filter: Binding::new(ch('/'), "filter"),
            clear_filter: Binding::new(key(KeyCode::Esc), "clear filter"),
            cancel_while_filtering: Binding::new(key(KeyCode::Esc), "cancel"),
            accept_while_filtering: Binding::with_keys(
                vec![key(KeyCode::Enter), key(KeyCode::Tab)],
                "apply filter",
            ),
            show_full_help: Binding::new(ch('?'), "more"),
            close_full_help: Binding::new(ch('?'), "close help"),
            quit: Binding::with_keys(vec![ch('q'), key(KeyCode::Esc)], "quit"),
            force_quit: Binding::new(KeyCombination::ctrl(KeyCode::Char('c')), "force quit"),
        }
    }
}

/// Count enabled bindings across help groups.
pub fn count_enabled(groups: &[Vec<&Binding>]) -> usize {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .filter(|b| b.enabled)
        .count()
}
