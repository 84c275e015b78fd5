//! The list component: an item store, a filter engine, a selection and a
//! viewport window behind one [`Component`].

use std::cell::Cell;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use sift_core::{Command, Component};
use tracing::warn;

use crate::delegate::{DefaultDelegate, ItemDelegate};
use crate::error::ListError;
use crate::filter::{FilterEngine, FilterState};
use crate::item::{FilteredItem, Item};
use crate::key::{self, Binding, Eligibility, KeyMap, ListKeyMap};
use crate::rank::Ranker;
use crate::runeutil::{self, ELLIPSIS};
use crate::selection::Selection;
use crate::spinner::Spinner;
use crate::status::{StatusMessage, DEFAULT_LIFETIME};
use crate::store::ItemStore;
use crate::viewport::{Window, WindowParams};

/// Messages for the list component.
#[derive(Debug, Clone)]
pub enum Message<I> {
    /// A key press event forwarded to the list for handling.
    KeyPress(KeyEvent),
    /// Start (or resume) editing the filter.
    ActivateFilter,
    /// The filter query changed to the given value.
    QueryChanged(String),
    /// Keep the filter being edited.
    AcceptFilter,
    /// Abandon the filter being edited.
    CancelFilter,
    /// Drop an applied filter.
    ClearFilter,
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    /// Insert an item; the index is clamped to the end.
    InsertItem(usize, I),
    /// Remove the item at an index, if there is one.
    RemoveItem(usize),
    /// Replace the item at an index. Out-of-range indexes are logged and ignored.
    SetItem(usize, I),
    /// Replace every item.
    SetItems(Vec<I>),
    /// Swap the item at an index with the one above it.
    MoveItemUp(usize),
    /// Swap the item at an index with the one below it.
    MoveItemDown(usize),
    /// A ranking pass finished.
    FilterMatches(Vec<FilteredItem<I>>),
    /// Show a transient status message.
    ShowStatus(String),
    /// A status message timer fired.
    StatusTimeout(u64),
    /// Switch between short and full help.
    ToggleHelp,
    /// Start the activity spinner.
    StartSpinner,
    /// Stop the activity spinner.
    StopSpinner,
    /// A spinner frame timer fired.
    SpinnerTick(u64),
}

/// Behavioural and layout options for [`List`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub title: String,
    pub show_title: bool,
    /// Show the filter prompt in place of the title while filtering.
    pub show_filter: bool,
    pub show_status_bar: bool,
    pub show_help: bool,
    pub filtering_enabled: bool,
    pub filter_prompt: String,
    pub status_message_lifetime: Duration,
    pub item_name_singular: String,
    pub item_name_plural: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            title: "List".to_string(),
            show_title: true,
            show_filter: true,
            show_status_bar: true,
            show_help: true,
            filtering_enabled: true,
            filter_prompt: "Filter: ".to_string(),
            status_message_lifetime: DEFAULT_LIFETIME,
            item_name_singular: "item".to_string(),
            item_name_plural: "items".to_string(),
        }
    }
}

/// Style configuration for the list chrome. Item styles belong to the delegate.
#[derive(Debug, Clone)]
pub struct ListStyle {
    pub title: Style,
    pub filter_prompt: Style,
    pub filter_cursor: Style,
    pub status_message: Style,
    pub status_bar: Style,
    pub status_empty: Style,
    pub status_filter_count: Style,
    pub divider_dot: String,
    pub no_items: Style,
    pub help_key: Style,
    pub help_description: Style,
    pub help_separator: String,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            filter_prompt: Style::default().fg(Color::Yellow),
            filter_cursor: Style::default().add_modifier(Modifier::REVERSED),
            status_message: Style::default().fg(Color::Green),
            status_bar: Style::default().fg(Color::Gray),
            status_empty: Style::default().fg(Color::DarkGray),
            status_filter_count: Style::default().fg(Color::DarkGray),
            divider_dot: " • ".to_string(),
            no_items: Style::default().fg(Color::DarkGray),
            help_key: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            help_description: Style::default().fg(Color::DarkGray),
            help_separator: " • ".to_string(),
        }
    }
}

/// A filterable, scrollable selection list.
///
/// Items live in a master sequence. While a filter is active the list shows
/// the filtered sequence instead; either way, selection and the viewport
/// window are expressed against whichever sequence is currently shown (the
/// "available" sequence).
///
/// Fuzzy ranking never runs inside [`update`](Component::update): query edits
/// and structural changes made while filtering return a deferred command that
/// ranks a snapshot of the master sequence and comes back as
/// [`Message::FilterMatches`].
///
/// # Example
///
/// ```ignore
/// let list = List::new(vec!["apple", "banana", "cherry"])
///     .with_title("Fruit")
///     .with_size(40, 12);
/// ```
pub struct List<I: Item> {
    store: ItemStore<I>,
    filter: FilterEngine<I>,
    selection: Selection,
    window: Cell<Window>,
    width: Cell<u16>,
    height: Cell<u16>,
    delegate: Box<dyn ItemDelegate<I>>,
    key_map: ListKeyMap,
    options: ListOptions,
    style: ListStyle,
    status: StatusMessage,
    spinner: Spinner,
    show_full_help: bool,
    quit_disabled: bool,
    focus: bool,
}

impl<I: Item> List<I> {
    /// Create a list from a vector of items.
    ///
    /// The first item is selected when the list is non-empty. The list starts
    /// focused and unsized; until [`set_size`](Self::set_size) or the first
    /// render, the viewport holds a single item.
    pub fn new(items: Vec<I>) -> Self {
        let selection = Selection::new(items.len());
        let mut list = Self {
            store: ItemStore::new(items),
            filter: FilterEngine::new(),
            selection,
            window: Cell::new(Window::default()),
            width: Cell::new(0),
            height: Cell::new(0),
            delegate: Box::new(DefaultDelegate::default()),
            key_map: ListKeyMap::default(),
            options: ListOptions::default(),
            style: ListStyle::default(),
            status: StatusMessage::default(),
            spinner: Spinner::default(),
            show_full_help: false,
            quit_disabled: false,
            focus: true,
        };
        list.sync();
        list
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    pub fn with_options(mut self, options: ListOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    /// Set a custom item delegate for rendering list items.
    pub fn with_delegate(mut self, delegate: impl ItemDelegate<I> + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Install a ranking policy. The default is [`SortedRanker`](crate::SortedRanker).
    pub fn with_ranker(mut self, ranker: impl Ranker) -> Self {
        self.filter.set_ranker(ranker);
        self
    }

    /// Set custom key bindings for the list.
    pub fn with_key_map(mut self, key_map: ListKeyMap) -> Self {
        self.key_map = key_map;
        self.sync();
        self
    }

    /// Replace the activity spinner (frames, interval, style).
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.set_size(width, height);
        self
    }

    pub fn with_filtering(mut self, enabled: bool) -> Self {
        self.set_filtering_enabled(enabled);
        self
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions) {
        self.status.set_lifetime(options.status_message_lifetime);
        let filtering_enabled = options.filtering_enabled;
        self.options = options;
        self.set_filtering_enabled(filtering_enabled);
    }

    pub fn set_delegate(&mut self, delegate: impl ItemDelegate<I> + 'static) {
        self.delegate = Box::new(delegate);
        self.sync();
    }

    pub fn key_map(&self) -> &ListKeyMap {
        &self.key_map
    }

    pub fn set_show_title(&mut self, show: bool) {
        self.options.show_title = show;
        self.sync();
    }

    pub fn set_show_filter(&mut self, show: bool) {
        self.options.show_filter = show;
        self.sync();
    }

    pub fn set_show_status_bar(&mut self, show: bool) {
        self.options.show_status_bar = show;
        self.sync();
    }

    pub fn set_show_help(&mut self, show: bool) {
        self.options.show_help = show;
        self.sync();
    }

    pub fn set_status_bar_item_name(
        &mut self,
        singular: impl Into<String>,
        plural: impl Into<String>,
    ) {
        self.options.item_name_singular = singular.into();
        self.options.item_name_plural = plural.into();
    }

    /// Give focus to the list, enabling keyboard handling.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove focus from the list. Key presses are ignored while blurred.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    // --- Items ---

    /// The master sequence.
    pub fn items(&self) -> &[I] {
        self.store.as_slice()
    }

    /// Replace all items. Re-ranks if a filter is active.
    pub fn set_items(&mut self, items: Vec<I>) -> Command<Message<I>> {
        self.store.set_all(items);
        let cmd = self.refilter();
        self.sync();
        cmd
    }

    /// Insert an item into the master sequence, appending if `index` is past
    /// the end. Re-ranks if a filter is active.
    pub fn insert_item(&mut self, index: usize, item: I) -> Command<Message<I>> {
        self.store.insert_at(index, item);
        let cmd = self.refilter();
        self.sync();
        cmd
    }

    /// Remove the item at `index` of the master sequence. Does nothing when
    /// out of range. Re-ranks if a filter is active.
    pub fn remove_item(&mut self, index: usize) -> Command<Message<I>> {
        if self.store.remove_at(index).is_none() {
            return Command::none();
        }
        let cmd = self.refilter();
        self.sync();
        cmd
    }

    /// Replace the item at `index` of the master sequence.
    ///
    /// Unlike the other mutations this does not clamp: an index past the end
    /// is an error.
    pub fn set_item(&mut self, index: usize, item: I) -> Result<Command<Message<I>>, ListError> {
        self.store.replace_at(index, item)?;
        let cmd = self.refilter();
        self.sync();
        Ok(cmd)
    }

    /// Swap the item at `index` with the one above it and follow it with the
    /// cursor. Only allowed while unfiltered.
    pub fn move_item_up(&mut self, index: usize) {
        if self.filter.state() != FilterState::Unfiltered {
            return;
        }
        self.store.swap_adjacent(index, index.saturating_sub(1));
        self.cursor_up();
    }

    /// Swap the item at `index` with the one below it and follow it with the
    /// cursor. Only allowed while unfiltered.
    pub fn move_item_down(&mut self, index: usize) {
        if self.filter.state() != FilterState::Unfiltered {
            return;
        }
        self.store.swap_adjacent(index, index.saturating_add(1));
        self.cursor_down();
    }

    // --- Selection ---

    /// Select `index` of the available sequence, clamped into range.
    pub fn select(&mut self, index: usize) {
        self.selection.select(index, self.available_len());
        self.sync();
    }

    pub fn reset_selected(&mut self) {
        self.selection.reset(self.available_len());
        self.sync();
    }

    pub fn cursor_up(&mut self) {
        self.selection.cursor_up(self.available_len());
        self.sync();
    }

    pub fn cursor_down(&mut self) {
        self.selection.cursor_down(self.available_len());
        self.sync();
    }

    /// Move up by one page of the viewport.
    pub fn page_up(&mut self) {
        self.selection.page_up(self.capacity(), self.available_len());
        self.sync();
    }

    /// Move down by one page of the viewport.
    pub fn page_down(&mut self) {
        self.selection.page_down(self.capacity(), self.available_len());
        self.sync();
    }

    pub fn go_to_end(&mut self) {
        self.selection.select_last(self.available_len());
        self.sync();
    }

    /// Selected index into the available sequence.
    pub fn index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Return a reference to the currently selected item, if any.
    pub fn selected_item(&self) -> Option<&I> {
        self.index().and_then(|i| self.available_item(i))
    }

    /// Length of the sequence currently shown.
    pub fn available_len(&self) -> usize {
        match self.filter.state() {
            FilterState::Unfiltered => self.store.len(),
            _ => self.filter.filtered().len(),
        }
    }

    /// Item at `index` of the sequence currently shown.
    pub fn available_item(&self, index: usize) -> Option<&I> {
        match self.filter.state() {
            FilterState::Unfiltered => self.store.get(index),
            _ => self.filter.filtered().get(index).map(|fi| &fi.item),
        }
    }

    /// Matched char positions for `index` of the available sequence. Empty
    /// while unfiltered.
    pub fn matches_for_item(&self, index: usize) -> &[usize] {
        match self.filter.state() {
            FilterState::Unfiltered => &[],
            _ => self.filter.matches_for(index),
        }
    }

    // --- Filtering ---

    pub fn filter_state(&self) -> FilterState {
        self.filter.state()
    }

    /// The current query text.
    pub fn filter_value(&self) -> &str {
        self.filter.query()
    }

    /// Whether the user is editing the filter.
    pub fn setting_filter(&self) -> bool {
        self.filter.state() == FilterState::Filtering
    }

    /// Whether a filter is applied and not being edited.
    pub fn is_filtered(&self) -> bool {
        self.filter.state() == FilterState::FilterApplied
    }

    pub fn filtering_enabled(&self) -> bool {
        self.filter.is_enabled()
    }

    /// Enable or disable filtering. Disabling drops any active filter.
    pub fn set_filtering_enabled(&mut self, enabled: bool) {
        self.options.filtering_enabled = enabled;
        self.filter.set_enabled(enabled);
        self.sync();
    }

    /// Start editing the filter, or resume editing an applied one.
    ///
    /// Ignored when filtering is disabled or there are no items.
    pub fn activate_filter(&mut self) {
        self.status.hide();
        if self.filter.activate(self.store.as_slice()) {
            self.selection.reset(self.available_len());
        }
        self.sync();
    }

    /// Replace the query while filtering and rank against it.
    pub fn set_filter_text(&mut self, query: impl Into<String>) -> Command<Message<I>> {
        if !self.setting_filter() || !self.filter.set_query(query) {
            return Command::none();
        }
        let cmd = self.refilter();
        self.sync();
        cmd
    }

    /// Leave editing mode, keeping the filter when it has a query and matches.
    pub fn accept_filter(&mut self) {
        self.status.hide();
        self.filter.accept(self.store.len());
        self.sync();
    }

    /// Leave editing mode and drop the filter.
    pub fn cancel_filter(&mut self) {
        if self.setting_filter() {
            self.filter.reset();
        }
        self.sync();
    }

    /// Drop any filter and show the master sequence.
    pub fn reset_filter(&mut self) {
        self.filter.reset();
        self.sync();
    }

    fn deliver(&mut self, matches: Vec<FilteredItem<I>>) {
        self.filter.deliver(matches);
        self.sync();
    }

    fn refilter(&self) -> Command<Message<I>> {
        match self.filter.ranking_request(&self.store) {
            // Ranking is CPU-bound; keep it off the async workers.
            Some(request) => Command::perform(
                async move {
                    match tokio::task::spawn_blocking(move || request.resolve()).await {
                        Ok(matches) => matches,
                        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                        Err(err) => {
                            warn!(%err, "ranking task cancelled");
                            Vec::new()
                        }
                    }
                },
                Message::FilterMatches,
            ),
            None => Command::none(),
        }
    }

    // --- Status ---

    /// Show a status message in the title bar for the configured lifetime.
    ///
    /// Replaces and cancels any message still showing.
    pub fn new_status_message(&mut self, text: impl Into<String>) -> Command<Message<I>> {
        self.status.show(text, Message::StatusTimeout)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.text()
    }

    // --- Spinner ---

    /// Use a different frame set for the spinner.
    pub fn set_spinner(&mut self, frames: &'static [&'static str]) {
        self.spinner.set_frames(frames);
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_spinning()
    }

    /// Show the spinner. The returned command drives its animation.
    pub fn start_spinner(&mut self) -> Command<Message<I>> {
        self.spinner.start(Message::SpinnerTick)
    }

    pub fn stop_spinner(&mut self) {
        self.spinner.stop();
    }

    pub fn toggle_spinner(&mut self) -> Command<Message<I>> {
        if self.spinner.is_spinning() {
            self.stop_spinner();
            Command::none()
        } else {
            self.start_spinner()
        }
    }

    // --- Layout ---

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width.set(width);
        self.height.set(height);
        self.sync();
    }

    pub fn width(&self) -> u16 {
        self.width.get()
    }

    pub fn height(&self) -> u16 {
        self.height.get()
    }

    /// The window of the available sequence being rendered.
    pub fn viewport(&self) -> Window {
        self.window.get()
    }

    /// Rows taken by the title, status bar and help.
    pub fn chrome_height(&self) -> usize {
        let mut rows = 0;
        if self.has_title_row() {
            rows += 1;
        }
        if self.options.show_status_bar {
            rows += 1;
        }
        rows + self.help_height()
    }

    /// Items that fit in the viewport.
    pub fn capacity(&self) -> usize {
        self.window_params().capacity()
    }

    pub fn show_full_help(&self) -> bool {
        self.show_full_help
    }

    pub fn toggle_help(&mut self) {
        self.show_full_help = !self.show_full_help;
        self.sync();
    }

    /// Disable both quit bindings, for embedders that handle quitting.
    pub fn disable_quit_keybindings(&mut self) {
        self.quit_disabled = true;
        self.key_map.quit.set_enabled(false);
        self.key_map.force_quit.set_enabled(false);
    }

    fn has_title_row(&self) -> bool {
        self.options.show_title || (self.options.show_filter && self.filter.is_enabled())
    }

    fn help_height(&self) -> usize {
        if !self.options.show_help {
            return 0;
        }
        if self.show_full_help {
            let rows = self
                .full_help()
                .iter()
                .map(|group| group.iter().filter(|b| b.enabled).count())
                .max()
                .unwrap_or(0);
            rows.max(1)
        } else {
            1
        }
    }

    fn window_params(&self) -> WindowParams {
        WindowParams {
            total_height: self.height.get() as usize,
            chrome_height: self.chrome_height(),
            item_height: self.delegate.height(),
            spacing: self.delegate.spacing(),
            selected: self.selection.index(),
            len: self.available_len(),
        }
    }

    fn reconcile_window(&self) {
        let mut window = self.window.get();
        window.reconcile(self.window_params());
        self.window.set(window);
    }

    /// Re-establish every derived invariant after a change: selection in
    /// range, bindings enabled to match state, viewport around the selection.
    fn sync(&mut self) {
        self.selection.clamp(self.available_len());
        self.update_key_eligibility();
        self.reconcile_window();
    }

    fn update_key_eligibility(&mut self) {
        self.key_map.update_eligibility(Eligibility {
            filter_state: self.filter.state(),
            has_items: !self.store.is_empty(),
            filtering_enabled: self.filter.is_enabled(),
            query_is_empty: self.filter.query().is_empty(),
            quit_disabled: self.quit_disabled,
        });
        if self.setting_filter() {
            return;
        }
        let toggles = self.show_full_help || key::count_enabled(&self.full_help()) > 1;
        self.key_map.show_full_help.set_enabled(toggles);
        self.key_map.close_full_help.set_enabled(toggles);
    }

    // --- Keys ---

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<I>> {
        if !self.focus {
            return Command::none();
        }
        if self.key_map.force_quit.matches(&key) {
            return Command::quit();
        }
        if self.setting_filter() {
            return self.handle_filtering_key(key);
        }

        let keys = &self.key_map;
        if keys.clear_filter.matches(&key) {
            // Matched before quit: both default to Esc.
            self.reset_filter();
        } else if keys.quit.matches(&key) {
            return Command::quit();
        } else if keys.cursor_up.matches(&key) {
            self.cursor_up();
        } else if keys.cursor_down.matches(&key) {
            self.cursor_down();
        } else if keys.page_up.matches(&key) {
            self.page_up();
        } else if keys.page_down.matches(&key) {
            self.page_down();
        } else if keys.go_to_start.matches(&key) {
            self.reset_selected();
        } else if keys.go_to_end.matches(&key) {
            self.go_to_end();
        } else if keys.filter.matches(&key) {
            self.activate_filter();
        } else if keys.show_full_help.matches(&key) || keys.close_full_help.matches(&key) {
            self.toggle_help();
        } else if let Some(index) = self.index() {
            if self.key_map.move_up.matches(&key) {
                self.move_item_up(index);
            } else if self.key_map.move_down.matches(&key) {
                self.move_item_down(index);
            }
        }

        let selected = self
            .index()
            .and_then(|i| match self.filter.state() {
                FilterState::Unfiltered => self.store.get(i),
                _ => self.filter.filtered().get(i).map(|fi| &fi.item),
            });
        self.delegate.update(&key, selected)
    }

    fn handle_filtering_key(&mut self, key: KeyEvent) -> Command<Message<I>> {
        if self.key_map.cancel_while_filtering.matches(&key) {
            self.cancel_filter();
            return Command::none();
        }
        if self.key_map.accept_while_filtering.matches(&key) {
            self.accept_filter();
            return Command::none();
        }
        let mut query = self.filter.query().to_string();
        match key.code {
            KeyCode::Backspace => {
                if query.pop().is_none() {
                    return Command::none();
                }
                self.set_filter_text(query)
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                query.push(c);
                self.set_filter_text(query)
            }
            _ => Command::none(),
        }
    }

    // --- Rendering ---

    fn title_line(&self, width: usize) -> Line<'static> {
        // Room for the spinner and its gap is kept even while it is stopped,
        // so the title does not shift when it starts.
        let spinner_width = self.spinner.width();
        let room = width.saturating_sub(spinner_width + 1);

        let mut spans = if self.options.show_filter && self.setting_filter() {
            self.filter_prompt_spans(room)
        } else if self.options.show_title {
            self.title_spans(room)
        } else {
            Vec::new()
        };

        if self.spinner.is_spinning() && width > spinner_width {
            let used: usize = spans.iter().map(Span::width).sum();
            let gap = width.saturating_sub(used + spinner_width);
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(self.spinner.frame(), self.spinner.style()));
        }
        Line::from(spans)
    }

    fn filter_prompt_spans(&self, room: usize) -> Vec<Span<'static>> {
        let prompt = runeutil::truncate(&self.options.filter_prompt, room, "");
        let query_room = room.saturating_sub(runeutil::display_width(&prompt) + 1);
        let mut spans = vec![Span::styled(prompt, self.style.filter_prompt)];
        if query_room > 0 {
            spans.push(Span::raw(runeutil::truncate(
                self.filter.query(),
                query_room,
                ELLIPSIS,
            )));
            spans.push(Span::styled(" ", self.style.filter_cursor));
        }
        spans
    }

    fn title_spans(&self, room: usize) -> Vec<Span<'static>> {
        let title = runeutil::truncate(&self.options.title, room, ELLIPSIS);
        let title_width = runeutil::display_width(&title);
        let mut spans = vec![Span::styled(title, self.style.title)];
        if let Some(text) = self.status.text() {
            let left = room.saturating_sub(title_width + 2);
            if left > 0 {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    runeutil::truncate(text, left, ELLIPSIS),
                    self.style.status_message,
                ));
            }
        }
        spans
    }

    fn status_line(&self) -> Line<'static> {
        let total = self.store.len();
        let available = self.available_len();
        let name = if available == 1 {
            &self.options.item_name_singular
        } else {
            &self.options.item_name_plural
        };
        let items = format!("{available} {name}");

        let mut spans = Vec::new();
        if self.setting_filter() {
            if available == 0 {
                spans.push(Span::styled("Nothing matched", self.style.status_empty));
            } else {
                spans.push(Span::styled(items, self.style.status_bar));
            }
        } else if total == 0 {
            spans.push(Span::styled(
                format!("No {}", self.options.item_name_plural),
                self.style.status_empty,
            ));
        } else {
            if self.is_filtered() {
                let query = runeutil::truncate(self.filter.query().trim(), 10, ELLIPSIS);
                spans.push(Span::styled(format!("“{query}” "), self.style.status_bar));
            }
            spans.push(Span::styled(items, self.style.status_bar));
        }

        let hidden = total.saturating_sub(available);
        if hidden > 0 {
            spans.push(Span::styled(self.style.divider_dot.clone(), self.style.status_bar));
            spans.push(Span::styled(
                format!("{hidden} filtered"),
                self.style.status_filter_count,
            ));
        }
        Line::from(spans)
    }

    fn item_lines(&self, width: u16) -> Vec<Line<'static>> {
        let available = self.available_len();
        if available == 0 {
            if self.setting_filter() {
                return Vec::new();
            }
            return vec![Line::styled(
                format!("No {}.", self.options.item_name_plural),
                self.style.no_items,
            )];
        }

        let window = self.window.get();
        let last = window.last.min(available - 1);
        let spacing = self.delegate.spacing();
        let mut lines = Vec::new();
        for index in window.first..=last {
            let Some(item) = self.available_item(index) else {
                break;
            };
            let selected = self.selection.index() == Some(index);
            lines.extend(self.delegate.render(
                item,
                index,
                selected,
                self.matches_for_item(index),
                width,
            ));
            if index != last {
                lines.extend(std::iter::repeat_n(Line::default(), spacing));
            }
        }
        lines
    }

    fn help_lines(&self) -> Vec<Line<'static>> {
        let entry = |b: &Binding| {
            vec![
                Span::styled(b.help_key(), self.style.help_key),
                Span::raw(" "),
                Span::styled(b.description.clone(), self.style.help_description),
            ]
        };

        if !self.show_full_help {
            let mut spans = Vec::new();
            for binding in self.short_help().into_iter().filter(|b| b.enabled) {
                if !spans.is_empty() {
                    spans.push(Span::styled(
                        self.style.help_separator.clone(),
                        self.style.help_description,
                    ));
                }
                spans.extend(entry(binding));
            }
            return vec![Line::from(spans)];
        }

        let columns: Vec<Vec<&Binding>> = self
            .full_help()
            .into_iter()
            .map(|group| group.into_iter().filter(|b| b.enabled).collect::<Vec<_>>())
            .filter(|group| !group.is_empty())
            .collect();
        let cell_width = |b: &Binding| {
            runeutil::display_width(&b.help_key()) + 1 + runeutil::display_width(&b.description)
        };
        let widths: Vec<usize> = columns
            .iter()
            .map(|group| group.iter().map(|&b| cell_width(b)).max().unwrap_or(0))
            .collect();
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        (0..rows)
            .map(|row| {
                let mut spans = Vec::new();
                for (column, width) in columns.iter().zip(&widths) {
                    if !spans.is_empty() {
                        spans.push(Span::raw("    "));
                    }
                    match column.get(row) {
                        Some(&binding) => {
                            spans.extend(entry(binding));
                            let pad = width.saturating_sub(cell_width(binding));
                            spans.push(Span::raw(" ".repeat(pad)));
                        }
                        None => spans.push(Span::raw(" ".repeat(*width))),
                    }
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl<I: Item> KeyMap for List<I> {
    fn short_help(&self) -> Vec<&Binding> {
        let keys = &self.key_map;
        let mut bindings = vec![&keys.cursor_up, &keys.cursor_down];
        if !self.setting_filter() {
            if let Some(extra) = self.delegate.key_map() {
                bindings.extend(extra.short_help());
            }
        }
        bindings.extend([
            &keys.filter,
            &keys.clear_filter,
            &keys.accept_while_filtering,
            &keys.cancel_while_filtering,
            &keys.quit,
            &keys.show_full_help,
        ]);
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let keys = &self.key_map;
        let mut groups = vec![vec![
            &keys.cursor_up,
            &keys.cursor_down,
            &keys.page_up,
            &keys.page_down,
            &keys.go_to_start,
            &keys.go_to_end,
            &keys.move_up,
            &keys.move_down,
        ]];
        if !self.setting_filter() {
            if let Some(extra) = self.delegate.key_map() {
                groups.extend(extra.full_help());
            }
        }
        groups.push(vec![
            &keys.filter,
            &keys.clear_filter,
            &keys.accept_while_filtering,
            &keys.cancel_while_filtering,
        ]);
        groups.push(vec![&keys.quit, &keys.close_full_help]);
        groups
    }
}

impl<I: Item> Component for List<I> {
    type Message = Message<I>;

    fn update(&mut self, msg: Message<I>) -> Command<Message<I>> {
        // Navigation is suspended while the query is being edited.
        let navigating = !self.setting_filter();
        let cmd = match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::ActivateFilter => {
                self.activate_filter();
                Command::none()
            }
            Message::QueryChanged(query) => self.set_filter_text(query),
            Message::AcceptFilter => {
                self.accept_filter();
                Command::none()
            }
            Message::CancelFilter => {
                self.cancel_filter();
                Command::none()
            }
            Message::ClearFilter => {
                if navigating {
                    self.reset_filter();
                }
                Command::none()
            }
            Message::CursorUp if navigating => {
                self.cursor_up();
                Command::none()
            }
            Message::CursorDown if navigating => {
                self.cursor_down();
                Command::none()
            }
            Message::PageUp if navigating => {
                self.page_up();
                Command::none()
            }
            Message::PageDown if navigating => {
                self.page_down();
                Command::none()
            }
            Message::GoToStart if navigating => {
                self.reset_selected();
                Command::none()
            }
            Message::GoToEnd if navigating => {
                self.go_to_end();
                Command::none()
            }
            Message::CursorUp
            | Message::CursorDown
            | Message::PageUp
            | Message::PageDown
            | Message::GoToStart
            | Message::GoToEnd => Command::none(),
            Message::InsertItem(index, item) => self.insert_item(index, item),
            Message::RemoveItem(index) => self.remove_item(index),
            Message::SetItem(index, item) => match self.set_item(index, item) {
                Ok(cmd) => cmd,
                Err(error) => {
                    warn!(%error, "ignoring item replacement");
                    Command::none()
                }
            },
            Message::SetItems(items) => self.set_items(items),
            Message::MoveItemUp(index) => {
                self.move_item_up(index);
                Command::none()
            }
            Message::MoveItemDown(index) => {
                self.move_item_down(index);
                Command::none()
            }
            Message::FilterMatches(matches) => {
                self.deliver(matches);
                Command::none()
            }
            Message::ShowStatus(text) => self.new_status_message(text),
            Message::StatusTimeout(id) => {
                self.status.expire(id);
                Command::none()
            }
            Message::ToggleHelp => {
                self.toggle_help();
                Command::none()
            }
            Message::StartSpinner => self.start_spinner(),
            Message::StopSpinner => {
                self.stop_spinner();
                Command::none()
            }
            Message::SpinnerTick(id) => self.spinner.tick(id, Message::SpinnerTick),
        };
        self.sync();
        cmd
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.width.set(area.width);
        self.height.set(area.height);
        self.reconcile_window();

        if area.height == 0 || area.width == 0 {
            return;
        }

        let has_title = self.has_title_row();
        let has_status = self.options.show_status_bar;
        let help_height = self.help_height();

        let mut constraints = Vec::new();
        if has_title {
            constraints.push(Constraint::Length(1));
        }
        if has_status {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));
        if help_height > 0 {
            constraints.push(Constraint::Length(help_height as u16));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let mut chunk_idx = 0;

        if has_title {
            let line = self.title_line(area.width as usize);
            frame.render_widget(Paragraph::new(line), chunks[chunk_idx]);
            chunk_idx += 1;
        }

        if has_status {
            frame.render_widget(Paragraph::new(self.status_line()), chunks[chunk_idx]);
            chunk_idx += 1;
        }

        let list_area = chunks[chunk_idx];
        chunk_idx += 1;
        frame.render_widget(Paragraph::new(self.item_lines(list_area.width)), list_area);

        if help_height > 0 {
            frame.render_widget(Paragraph::new(self.help_lines()), chunks[chunk_idx]);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
