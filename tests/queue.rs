#[macro_use]
mod common;

use common::Value;
use recompute::{Error, Immediate, Queue, Recomputable, Task, channel, computed};

model!(Note ["text", "excerpt", "shouted"]);

#[computed]
impl Note {
    fn compute_excerpt_attribute(text: String) -> String {
        text.chars().take(5).collect()
    }

    fn compute_shouted_attribute(text: String) -> Result<String, Quiet> {
        if text.is_empty() { Err(Quiet) } else { Ok(text.to_uppercase()) }
    }
}

/// There is nothing to shout.
#[derive(Debug, thiserror::Error)]
#[error("nothing to shout")]
struct Quiet;

fn note(text: &str) -> Note {
    Note::load([("text", text)])
}

/// Test that enqueueing leaves the record alone and the worker recomputes
/// unconditionally before saving.
#[test]
fn test_deferred_recompute() {
    let (queue, worker) = channel();
    let note = note("hello world");

    recompute::recompute_async(&note, &queue).unwrap();
    assert_eq!(note.get("excerpt"), Value::Null);
    assert!(note.persisted().is_empty());

    // Nothing is dirty, yet the deferred pass still runs everything.
    let outcomes = worker.run_pending();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_ok());

    let persisted = note.persisted();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].get("excerpt"), Some(&Value::from("hello")));
    assert_eq!(persisted[0].get("shouted"), Some(&Value::from("HELLO WORLD")));

    // The enqueued copy was changed, not the record.
    assert_eq!(note.get("excerpt"), Value::Null);
    assert!(worker.run_pending().is_empty());
}

/// Test the trait entry points.
#[test]
fn test_recomputable() {
    let mut note = note("abcdefgh");
    note.recompute_async(&Immediate).unwrap();
    assert_eq!(note.persisted().len(), 1);
    assert_eq!(note.get("excerpt"), Value::Null);

    note.recompute().unwrap();
    assert_eq!(note.get("excerpt"), Value::from("abcde"));
}

/// Test that failures of the deferred work do not reach the enqueuer.
#[test]
fn test_worker_failure() {
    let (queue, worker) = channel();
    let note = note("");

    recompute::recompute_async(&note, &queue).unwrap();
    Immediate.enqueue(Task::new("failing", || Err(Error::persistence("disk full")))).unwrap();

    let outcomes = worker.run_pending();
    assert!(matches!(
        outcomes.as_slice(),
        [Err(Error::Invocation { function: "compute_shouted_attribute", .. })]
    ));
    assert!(note.persisted().is_empty());
}

/// Test that enqueueing on a closed queue fails right away.
#[test]
fn test_disconnected() {
    let (queue, worker) = channel();
    drop(worker);

    let err = recompute::recompute_async(&note("text"), &queue).unwrap_err();
    let Error::Queue(source) = err else {
        panic!("expected a queue error");
    };
    assert!(source.is::<recompute::Disconnected>());
}

/// Test draining a queue on another thread.
#[test]
fn test_worker_thread() {
    let (queue, worker) = channel();
    let handle = std::thread::spawn(move || worker.run());

    let notes = [note("first note"), note("second note"), note("")];
    for note in &notes {
        note.recompute_async(&queue).unwrap();
    }

    drop(queue);
    assert_eq!(handle.join().unwrap(), 1);
    assert_eq!(notes[0].persisted()[0].get("excerpt"), Some(&Value::from("first")));
    assert_eq!(notes[1].persisted()[0].get("excerpt"), Some(&Value::from("secon")));
    assert!(notes[2].persisted().is_empty());
}

/// Test that the label of a task is kept for logging.
#[test]
fn test_task_label() {
    let task = Task::new("label", || Ok(()));
    assert_eq!(task.label(), "label");
    assert_eq!(format!("{task:?}"), "Task(\"label\")");
    task.run().unwrap();
}
