use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use tokio::sync::mpsc;
use tracing::trace;

/// Errors produced while driving an [`EventLoop`].
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    /// The loop already processed a quit command.
    #[error("event loop has stopped")]
    Stopped,
}

/// A cloneable handle for posting messages into a running [`EventLoop`].
///
/// Handles can be moved into other tasks or threads; messages they send are
/// processed in arrival order by the loop that created them. Sending after the
/// loop is dropped is a silent no-op.
pub struct EventLoopHandle<Msg: Send + 'static> {
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> Clone for EventLoopHandle<Msg> {
    fn clone(&self) -> Self {
        Self {
            msg_tx: self.msg_tx.clone(),
        }
    }
}

impl<Msg: Send + 'static> EventLoopHandle<Msg> {
    /// Enqueue a message for the loop.
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }
}

/// Single-writer event loop for a [`Component`].
///
/// Every message, whether it comes from outside through an
/// [`EventLoopHandle`] or from a finished [`Command`], travels through one
/// unbounded channel and is applied with [`Component::update`] strictly one at
/// a time. Deferred commands run as detached tokio tasks and only ever post
/// their output back onto the channel, so component state has exactly one
/// writer.
///
/// The loop is headless: rendering belongs to whoever owns the terminal.
///
/// # Example
///
/// ```rust,ignore
/// let mut event_loop = EventLoop::new(List::new(items));
/// event_loop.send(Message::ActivateFilter);
/// event_loop.send(Message::QueryChanged("ap".into()));
/// event_loop.step().await?; // activate
/// event_loop.step().await?; // query change, dispatches ranking
/// event_loop.step().await?; // ranking result arrives
/// ```
pub struct EventLoop<C: Component> {
    component: C,
    msg_tx: mpsc::UnboundedSender<C::Message>,
    msg_rx: mpsc::UnboundedReceiver<C::Message>,
    should_quit: bool,
}

impl<C: Component> EventLoop<C> {
    /// Create a loop that owns `component`.
    pub fn new(component: C) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            component,
            msg_tx,
            msg_rx,
            should_quit: false,
        }
    }

    /// Get a handle for external message injection.
    pub fn handle(&self) -> EventLoopHandle<C::Message> {
        EventLoopHandle {
            msg_tx: self.msg_tx.clone(),
        }
    }

    /// Enqueue a message. It is applied on a later [`step`](Self::step).
    pub fn send(&self, msg: C::Message) {
        let _ = self.msg_tx.send(msg);
    }

    /// Shared access to the component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component, bypassing the message queue.
    ///
    /// Returned commands from direct calls should be handed to
    /// [`dispatch`](Self::dispatch).
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Whether a [`Command::quit`] has been processed.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Execute a command.
    ///
    /// Immediate messages are enqueued, futures are spawned and their output
    /// enqueued on completion, batches recurse. Must be called from within a
    /// tokio runtime when the command contains futures.
    pub fn dispatch(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                trace!("quit requested");
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                trace!("spawning deferred command");
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.dispatch(cmd);
                }
            }
        }
    }

    /// Wait for the next message, apply it, and dispatch the resulting command.
    pub async fn step(&mut self) -> Result<(), EventLoopError> {
        if self.should_quit {
            return Err(EventLoopError::Stopped);
        }
        // The loop holds a sender of its own, so the channel never closes.
        if let Some(msg) = self.msg_rx.recv().await {
            self.process_message(msg);
        }
        Ok(())
    }

    /// Apply every message that is already queued without waiting.
    ///
    /// Returns the number of messages processed.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
            if self.should_quit {
                break;
            }
        }
        count
    }

    /// Run until a quit command is processed and return the component.
    pub async fn run(mut self) -> Result<C, EventLoopError> {
        while !self.should_quit {
            self.step().await?;
        }
        Ok(self.component)
    }

    fn process_message(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.dispatch(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::Frame;
    use std::time::Duration;

    struct Recorder {
        seen: Vec<String>,
    }

    enum RecMsg {
        Push(String),
        Later(String, u64),
        Stop,
    }

    impl Component for Recorder {
        type Message = RecMsg;

        fn update(&mut self, msg: RecMsg) -> Command<RecMsg> {
            match msg {
                RecMsg::Push(s) => {
                    self.seen.push(s);
                    Command::none()
                }
                RecMsg::Later(s, ms) => Command::perform(
                    async move {
                        tokio::time::sleep(Duration::from_millis(ms)).await;
                        s
                    },
                    RecMsg::Push,
                ),
                RecMsg::Stop => Command::quit(),
            }
        }

        fn view(&self, _frame: &mut Frame, _area: Rect) {}
    }

    #[tokio::test]
    async fn step_applies_messages_in_order() {
        let mut lp = EventLoop::new(Recorder { seen: vec![] });
        lp.send(RecMsg::Push("a".into()));
        lp.send(RecMsg::Push("b".into()));
        lp.step().await.unwrap();
        lp.step().await.unwrap();
        assert_eq!(lp.component().seen, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn deferred_results_post_back_in_completion_order() {
        let mut lp = EventLoop::new(Recorder { seen: vec![] });
        lp.send(RecMsg::Later("slow".into(), 50));
        lp.send(RecMsg::Later("fast".into(), 10));
        lp.step().await.unwrap();
        lp.step().await.unwrap();
        lp.step().await.unwrap();
        lp.step().await.unwrap();
        assert_eq!(lp.component().seen, vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn run_returns_component_on_quit() {
        let lp = EventLoop::new(Recorder { seen: vec![] });
        let handle = lp.handle();
        handle.send(RecMsg::Push("x".into()));
        handle.send(RecMsg::Stop);
        let rec = lp.run().await.unwrap();
        assert_eq!(rec.seen, vec!["x"]);
    }

    #[tokio::test]
    async fn step_after_quit_is_an_error() {
        let mut lp = EventLoop::new(Recorder { seen: vec![] });
        lp.send(RecMsg::Stop);
        lp.step().await.unwrap();
        assert!(lp.should_quit());
        assert!(matches!(lp.step().await, Err(EventLoopError::Stopped)));
    }

    #[tokio::test]
    async fn drain_processes_only_queued_messages() {
        let mut lp = EventLoop::new(Recorder { seen: vec![] });
        lp.send(RecMsg::Push("1".into()));
        lp.send(RecMsg::Push("2".into()));
        assert_eq!(lp.drain(), 2);
        assert_eq!(lp.drain(), 0);
    }
}
