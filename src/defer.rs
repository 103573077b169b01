use std::any::type_name;
use std::fmt::{self, Debug, Formatter};
use std::sync::mpsc;

use thiserror::Error;

use crate::error::{BoxError, Error};
use crate::record::Computed;

/// A unit of deferred work.
pub struct Task {
    label: &'static str,
    work: Box<dyn FnOnce() -> Result<(), Error> + Send>,
}

impl Task {
    /// Wrap some work. The label shows up in logs.
    pub fn new<F>(label: &'static str, work: F) -> Self
    where
        F: FnOnce() -> Result<(), Error> + Send + 'static,
    {
        Self { label, work: Box::new(work) }
    }

    /// What the task is working on.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Execute the task.
    pub fn run(self) -> Result<(), Error> {
        (self.work)()
    }
}

impl Debug for Task {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Task").field(&self.label).finish()
    }
}

/// Something that accepts deferred work.
///
/// The transport (in-process channel, thread pool, external broker) is up to
/// the host. Errors of the eventual execution are not reported back to the
/// enqueuer.
pub trait Queue {
    /// Hand a task over for later execution.
    fn enqueue(&self, task: Task) -> Result<(), BoxError>;
}

impl<Q: Queue + ?Sized> Queue for &Q {
    fn enqueue(&self, task: Task) -> Result<(), BoxError> {
        (**self).enqueue(task)
    }
}

/// A record that can recompute its attributes, in place or deferred, and
/// persist itself.
///
/// Deferred work operates on a copy of the record taken at enqueue time,
/// which is why records must be `Clone + Send`.
pub trait Recomputable: Computed + Clone + Send {
    /// Persist the record's current field state.
    fn save(&mut self) -> Result<(), Error>;

    /// Run every compute function of the record.
    fn recompute(&mut self) -> Result<&mut Self, Error> {
        crate::recompute_all(self)
    }

    /// Enqueue an unconditional recompute followed by a save.
    fn recompute_async<Q: Queue + ?Sized>(&self, queue: &Q) -> Result<(), Error> {
        recompute_async(self, queue)
    }
}

/// Enqueue an unconditional recompute of a copy of the record, followed by
/// a save of that copy.
///
/// The record itself is not touched. Unlike the pre-persist path, the
/// deferred pass runs every compute function, dirty or not.
pub fn recompute_async<R, Q>(record: &R, queue: &Q) -> Result<(), Error>
where
    R: Recomputable,
    Q: Queue + ?Sized,
{
    let mut copy = record.clone();
    let task = Task::new(type_name::<R>(), move || {
        copy.recompute()?;
        copy.save()
    });

    queue.enqueue(task).map_err(Error::Queue)?;
    tracing::debug!(record = type_name::<R>(), "enqueued deferred recompute");
    Ok(())
}

/// A queue that runs each task right away, in the enqueuing thread.
///
/// Failures of the task are logged and swallowed, just as a worker would.
#[derive(Debug, Default, Copy, Clone)]
pub struct Immediate;

impl Queue for Immediate {
    fn enqueue(&self, task: Task) -> Result<(), BoxError> {
        let label = task.label();
        if let Err(err) = task.run() {
            tracing::error!(task = label, error = %err, "deferred task failed");
        }
        Ok(())
    }
}

/// Create an in-process queue and the worker that drains it.
pub fn channel() -> (Sender, Worker) {
    let (tx, rx) = mpsc::channel();
    (Sender(tx), Worker(rx))
}

/// The enqueuing half of [`channel`].
#[derive(Debug, Clone)]
pub struct Sender(mpsc::Sender<Task>);

impl Queue for Sender {
    fn enqueue(&self, task: Task) -> Result<(), BoxError> {
        self.0.send(task).map_err(|_| Disconnected.into())
    }
}

/// The worker has been dropped.
#[derive(Debug, Error)]
#[error("queue worker is gone")]
pub struct Disconnected;

/// The executing half of [`channel`].
#[derive(Debug)]
pub struct Worker(mpsc::Receiver<Task>);

impl Worker {
    /// Run all tasks that are queued right now and return their outcomes in
    /// queue order.
    pub fn run_pending(&self) -> Vec<Result<(), Error>> {
        self.0.try_iter().map(execute).collect()
    }

    /// Run tasks until every sender has been dropped.
    ///
    /// Returns the number of tasks that failed.
    pub fn run(self) -> usize {
        self.0.into_iter().map(execute).filter(Result::is_err).count()
    }
}

/// Run a task on the worker side, logging failures.
fn execute(task: Task) -> Result<(), Error> {
    let label = task.label();
    let result = task.run();
    match &result {
        Ok(()) => tracing::trace!(task = label, "deferred task finished"),
        Err(err) => tracing::warn!(task = label, error = %err, "deferred task failed"),
    }
    result
}
