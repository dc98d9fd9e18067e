//! A single-threaded queue of tasks to run later.
//!
//! Tasks get mutable access to a context (in practice the [`Controller`](crate::mk2::Controller))
//! when they run. There's no cancellation: once scheduled, a task runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::debug;

type Task<C> = Box<dyn FnOnce(&mut C)>;

struct Entry<C> {
    due: Instant,
    seq: u64,
    task: Task<C>,
}

struct Queue<C> {
    entries: Vec<Entry<C>>,
    next_seq: u64,
}

/// Cloneable handle to a shared task queue.
///
/// All clones feed the same queue, so a handle can be moved into an event listener that wants
/// to schedule work while the owner of the context is busy dispatching.
pub struct Scheduler<C> {
    queue: Rc<RefCell<Queue<C>>>,
}

impl<C> Clone for Scheduler<C> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Queue {
                entries: Vec::new(),
                next_seq: 0,
            })),
        }
    }

    /// Run `task` on the next turn, i.e. the next call to [`run_due`](Self::run_due)
    pub fn defer(&self, task: impl FnOnce(&mut C) + 'static) {
        self.schedule(Duration::ZERO, task);
    }

    /// Run `task` once `delay` has passed
    pub fn schedule(&self, delay: Duration, task: impl FnOnce(&mut C) + 'static) {
        let mut queue = self.queue.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.entries.push(Entry {
            due: Instant::now() + delay,
            seq,
            task: Box::new(task),
        });
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the earliest pending task becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow().entries.iter().map(|e| e.due).min()
    }

    /// Run every task that is due at `now`, earliest deadline first and in scheduling order
    /// for equal deadlines.
    ///
    /// Tasks scheduled while this runs are left for the next call. Returns the number of tasks
    /// that ran.
    pub fn run_due(&self, context: &mut C, now: Instant) -> usize {
        let mut due = {
            let mut queue = self.queue.borrow_mut();
            let (due, pending) = std::mem::take(&mut queue.entries)
                .into_iter()
                .partition::<Vec<_>, _>(|e| e.due <= now);
            queue.entries = pending;
            due
        };
        due.sort_by_key(|e| (e.due, e.seq));

        let count = due.len();
        for entry in due {
            // the queue isn't borrowed here, tasks may schedule more
            (entry.task)(context);
        }
        if count > 0 {
            debug!("ran {} scheduled task(s)", count);
        }
        count
    }
}
