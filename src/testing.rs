use std::cell::RefCell;

thread_local! {
    /// The compute functions invoked by the last pass on this thread.
    static INVOKED: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// The compute functions invoked by the last recompute pass on this thread,
/// in invocation order.
pub fn last_invoked() -> Vec<&'static str> {
    INVOKED.with(|cell| cell.borrow().clone())
}

/// Marks the start of a pass.
pub(crate) fn begin_pass() {
    INVOKED.with(|cell| cell.borrow_mut().clear())
}

/// Records that a compute function was invoked.
pub(crate) fn register_invocation(function: &'static str) {
    INVOKED.with(|cell| cell.borrow_mut().push(function))
}
