use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A side effect returned from [`Component::update`](crate::Component::update).
///
/// Commands never touch component state. Immediate messages are fed back into
/// `update` on the next turn of the event loop, and deferred work (ranking,
/// timers) runs as a detached task whose output is posted back to the same
/// loop as a message.
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let cmd = Command::none();
///
/// // Run a future off the loop and map the result to a message:
/// let cmd = Command::perform(
///     async move { rank(&query, &keys) },
///     Msg::Ranked,
/// );
///
/// // Fire a message after a delay:
/// let cmd = Command::tick(Duration::from_secs(1), |_| Msg::Timeout);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
}

/// Actions the event loop handles synchronously, without spawning a task.
pub enum Action<Msg> {
    /// Enqueue a message immediately.
    Message(Msg),
    /// Stop the event loop.
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run an async future, map the result to a message.
    ///
    /// The future is spawned by the event loop; `update` never awaits it.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Quit the event loop.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Run multiple commands concurrently.
    ///
    /// `None` entries are dropped; a batch of one collapses to that command.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_default(),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// One-shot timer: fires once after `duration`, mapping the instant to a message.
    pub fn tick(
        duration: std::time::Duration,
        map: impl FnOnce(std::time::Instant) -> Msg + Send + 'static,
    ) -> Self {
        Command {
            inner: CommandInner::Future(Box::pin(async move {
                tokio::time::sleep(duration).await;
                map(std::time::Instant::now())
            })),
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter()
                        .map(|cmd| cmd.map_with(f.clone()))
                        .collect(),
                ),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command, or any command in its batch, runs a future.
    pub fn is_deferred(&self) -> bool {
        match &self.inner {
            CommandInner::Future(_) => true,
            CommandInner::Batch(cmds) => cmds.iter().any(Command::is_deferred),
            _ => false,
        }
    }

    /// If this command is an immediate message action, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a single future, return it.
    pub fn into_future(self) -> Option<BoxFuture<'static, Msg>> {
        match self.inner {
            CommandInner::Future(fut) => Some(fut),
            _ => None,
        }
    }
}

impl<Msg: Send + 'static> Default for Command<Msg> {
    fn default() -> Self {
        Command::none()
    }
}

impl<Msg: Send + 'static> std::fmt::Debug for Command<Msg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            CommandInner::None => f.write_str("Command::None"),
            CommandInner::Action(Action::Message(_)) => f.write_str("Command::Message"),
            CommandInner::Action(Action::Quit) => f.write_str("Command::Quit"),
            CommandInner::Future(_) => f.write_str("Command::Future"),
            CommandInner::Batch(cmds) => f.debug_list().entries(cmds).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn command_message_creates_action() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_quit_creates_quit() {
        let cmd: Command<()> = Command::quit();
        assert_eq!(format!("{cmd:?}"), "Command::Quit");
    }

    #[test]
    fn command_batch_empty_returns_none() {
        let cmd: Command<()> = Command::batch(vec![]);
        assert!(cmd.is_none());
    }

    #[test]
    fn command_batch_drops_none_entries() {
        let cmd: Command<i32> =
            Command::batch(vec![Command::none(), Command::message(1), Command::none()]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn command_batch_multiple() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        assert_eq!(format!("{cmd:?}"), "[Command::Message, Command::Message]");
    }

    #[test]
    fn command_map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message().as_deref(), Some("42"));
    }

    #[test]
    fn command_map_quit_stays_quit() {
        let cmd: Command<i32> = Command::quit();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(format!("{mapped:?}"), "Command::Quit");
    }

    #[test]
    fn deferred_detection_looks_inside_batches() {
        let cmd: Command<i32> = Command::batch(vec![
            Command::message(1),
            Command::perform(async { 2 }, |n| n),
        ]);
        assert!(cmd.is_deferred());
        assert!(!Command::<i32>::message(1).is_deferred());
    }

    #[tokio::test]
    async fn perform_maps_output() {
        let cmd: Command<String> = Command::perform(async { 7 }, |n: i32| n.to_string());
        let fut = cmd.into_future().expect("future command");
        assert_eq!(fut.await, "7");
    }

    #[tokio::test(start_paused = true)]
    async fn tick_fires_after_duration() {
        let cmd: Command<&'static str> =
            Command::tick(std::time::Duration::from_secs(5), |_| "fired");
        let start = tokio::time::Instant::now();
        let fut = cmd.into_future().expect("future command");
        assert_eq!(fut.await, "fired");
        assert!(start.elapsed() >= std::time::Duration::from_secs(5));
    }
}
