use std::time::Instant;

use super::cancel::CancelToken;
use super::frame_clock::{FrameClock, FrameTime};

/// Directive returned by a frame task.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameControl {
    /// Invoke the task again on the next frame.
    Continue,
    /// Drop the task.
    Stop,
}

/// Work invoked once per frame until it stops or is cancelled.
///
/// Closures `FnMut(FrameTime) -> FrameControl` implement this trait.
pub trait FrameTask: 'static {
    fn on_frame(&mut self, time: FrameTime) -> FrameControl;
}

impl<F> FrameTask for F
where
    F: FnMut(FrameTime) -> FrameControl + 'static,
{
    fn on_frame(&mut self, time: FrameTime) -> FrameControl {
        self(time)
    }
}

/// Identifier of a scheduled task, unique per scheduler.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TaskId(u64);

/// Handle returned by [`FrameScheduler::request`].
///
/// Cancelling through the handle (or any clone of its token) guarantees the
/// task is never invoked again, even if its next invocation is already queued.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    id: TaskId,
    token: CancelToken,
}

impl FrameHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Scheduled {
    id: TaskId,
    token: CancelToken,
    task: Box<dyn FrameTask>,
}

/// Frame-driven task scheduler owned by the render loop.
///
/// Plays the role of a display refresh callback: every task that is pending
/// when [`run_frame`](Self::run_frame) starts is invoked exactly once with the
/// frame's timestamp. Tasks that return [`FrameControl::Continue`] are
/// rescheduled for the next frame. Tasks requested between frames first run
/// on the next one.
///
/// Single-threaded: at most one task runs at a time.
pub struct FrameScheduler {
    clock: FrameClock,
    pending: Vec<Scheduled>,
    incoming: Vec<Scheduled>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }

    pub fn with_clock(clock: FrameClock) -> Self {
        Self {
            clock,
            pending: Vec::new(),
            incoming: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `task` to run on every frame starting with the next one.
    pub fn request(&mut self, task: impl FrameTask) -> FrameHandle {
        self.request_with_token(task, CancelToken::new())
    }

    /// Like [`request`](Self::request) but observes an existing token, so an
    /// owner can cancel several tasks at once.
    pub fn request_with_token(&mut self, task: impl FrameTask, token: CancelToken) -> FrameHandle {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        self.incoming.push(Scheduled { id, token: token.clone(), task: Box::new(task) });
        log::trace!("frame task {id:?} scheduled");

        FrameHandle { id, token }
    }

    /// Number of tasks that will run on the next frame (cancelled ones included
    /// until the scheduler observes the cancellation).
    pub fn pending(&self) -> usize {
        self.pending.len() + self.incoming.len()
    }

    /// Runs one frame stamped with the current time.
    pub fn run_frame(&mut self) -> FrameTime {
        self.run_frame_at(Instant::now())
    }

    /// Runs one frame stamped with `now`.
    pub fn run_frame_at(&mut self, now: Instant) -> FrameTime {
        let time = self.clock.tick_at(now);

        self.pending.append(&mut self.incoming);
        let due = std::mem::take(&mut self.pending);

        for mut entry in due {
            // Checked on entry: a task cancelled after it was queued must not
            // observe this frame.
            if entry.token.is_cancelled() {
                log::trace!("frame task {:?} dropped after cancellation", entry.id);
                continue;
            }

            match entry.task.on_frame(time) {
                FrameControl::Continue if !entry.token.is_cancelled() => self.pending.push(entry),
                _ => log::trace!("frame task {:?} finished", entry.id),
            }
        }

        time
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    fn counting_task(counter: &Rc<Cell<u32>>) -> impl FrameTask {
        let counter = counter.clone();
        move |_: FrameTime| {
            counter.set(counter.get() + 1);
            FrameControl::Continue
        }
    }

    #[test]
    fn task_runs_once_per_frame_until_cancelled() {
        let mut scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));
        let handle = scheduler.request(counting_task(&count));

        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(count.get(), 2);

        handle.cancel();
        scheduler.run_frame();
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_while_queued_never_runs() {
        let mut scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));
        let handle = scheduler.request(counting_task(&count));

        // Queued for the next frame, then cancelled before that frame arrives.
        handle.cancel();
        scheduler.run_frame();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn cancellation_from_a_sibling_task_suppresses_the_next_invocation() {
        let mut scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));
        let victim = scheduler.request(counting_task(&count));

        let token = victim.token().clone();
        scheduler.request(move |_: FrameTime| {
            token.cancel();
            FrameControl::Stop
        });

        // The victim runs first this frame, its sibling cancels it afterwards.
        scheduler.run_frame();
        assert_eq!(count.get(), 1);
        scheduler.run_frame();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn stop_drops_task() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request(|_: FrameTime| FrameControl::Stop);
        scheduler.run_frame();
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tasks_observe_the_frame_timestamp() {
        let base = Instant::now();
        let mut scheduler = FrameScheduler::with_clock(FrameClock::starting_at(base));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        scheduler.request(move |t: FrameTime| {
            sink.borrow_mut().push(t.now);
            FrameControl::Continue
        });

        let t1 = base + Duration::from_millis(16);
        let t2 = base + Duration::from_millis(33);
        scheduler.run_frame_at(t1);
        scheduler.run_frame_at(t2);
        assert_eq!(*seen.borrow(), vec![t1, t2]);
    }
}
