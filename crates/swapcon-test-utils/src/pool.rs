//! A [`ConnectionPool`] double that records purges.

use std::cell::RefCell;
use std::rc::Rc;

use swapcon_core::ConnectionPool;

/// Pool with a fixed set of open handles. Purged names are appended to a
/// shared log so tests can inspect them after handing the pool over.
#[derive(Debug, Default)]
pub struct RecordingPool {
    open: Vec<String>,
    purged: Rc<RefCell<Vec<String>>>,
}

impl RecordingPool {
    /// Create a pool with `open` handles.
    pub fn new(open: &[&str]) -> Self {
        Self {
            open: open.iter().map(|s| s.to_string()).collect(),
            purged: Rc::default(),
        }
    }

    /// Shared handle on the purge log.
    pub fn purged(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.purged)
    }
}

impl ConnectionPool for RecordingPool {
    fn open_connections(&self) -> Vec<String> {
        self.open.clone()
    }

    fn purge(&mut self, name: &str) {
        self.open.retain(|open| open != name);
        self.purged.borrow_mut().push(name.to_string());
    }
}
