use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Component`] without an event loop.
///
/// Immediate messages returned by `update` are queued and flushed with
/// [`drain_messages`](TestHarness::drain_messages). Deferred commands are
/// *not* spawned: their futures are parked in dispatch order so a test can
/// resolve them in order with
/// [`resolve_deferred`](TestHarness::resolve_deferred), or take them with
/// [`take_deferred`](TestHarness::take_deferred) and deliver results in any
/// order it likes.
///
/// # Example
///
/// ```rust,ignore
/// use sift_core::testing::TestHarness;
///
/// let mut h = TestHarness::new(List::new(vec!["apple", "banana"]));
/// h.send(Message::ActivateFilter);
/// h.send(Message::QueryChanged("ban".into()));
/// h.resolve_deferred().await; // ranking result is applied
/// assert_eq!(h.component().available_len(), 1);
/// ```
pub struct TestHarness<C: Component> {
    component: C,
    pending_messages: Vec<C::Message>,
    deferred: Vec<BoxFuture<'static, C::Message>>,
    quit: bool,
}

impl<C: Component> TestHarness<C> {
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending_messages: Vec::new(),
            deferred: Vec::new(),
            quit: false,
        }
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.collect(cmd);
    }

    /// Feed a command produced by a direct method call into the harness.
    pub fn absorb(&mut self, cmd: Command<C::Message>) {
        self.collect(cmd);
    }

    /// Process all pending immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.component.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Number of parked deferred futures.
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Take every parked deferred future, oldest first.
    pub fn take_deferred(&mut self) -> Vec<BoxFuture<'static, C::Message>> {
        std::mem::take(&mut self.deferred)
    }

    /// Await parked futures in dispatch order and apply their messages.
    ///
    /// Futures produced while resolving are parked and resolved too, as are
    /// immediate messages. Requires a tokio runtime when the futures use
    /// tokio timers.
    pub async fn resolve_deferred(&mut self) {
        self.drain_messages();
        while !self.deferred.is_empty() {
            let futures = self.take_deferred();
            for fut in futures {
                let msg = fut.await;
                self.send(msg);
                self.drain_messages();
            }
        }
    }

    /// Whether a quit command was returned.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Shared access to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component for direct test setup.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component to a [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.component.view(frame, frame.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain string.
    ///
    /// Rows are separated by newlines; trailing whitespace within each row is
    /// preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Future(fut) => self.deferred.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}
