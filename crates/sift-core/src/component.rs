use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A self-contained piece of state that renders into a given [`Rect`].
///
/// Components follow the Elm Architecture: all mutation happens in
/// [`update`](Component::update), rendering in [`view`](Component::view) only
/// reads state (interior caches aside), and side effects are returned as
/// [`Command`]s for the event loop to run.
///
/// # Composition pattern
///
/// Embed a component in a parent by wrapping its message type in a parent
/// variant and lifting commands with [`Command::map`]:
///
/// ```rust,ignore
/// use sift_core::{Command, Component};
/// use sift_list::{List, Message as ListMsg};
///
/// enum AppMsg { List(ListMsg<String>) }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::List(m) => self.list.update(m).map(AppMsg::List),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; a parent
    /// calls [`.map()`](Command::map) to lift it into its own message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
