use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::VecDeque;

use super::stats::StatsAccumulator;

// Index into Task Vec
pub type TaskId = usize;
pub type Pid = u64;
pub type Ticks = u64;

/// Priority key of a task in a shortest-remaining-time pool.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Remaining {
    pub ticks: Ticks,
    pub pid: Pid,
}

// KeyedPriorityQueue is a max-heap, so the shortest remaining time (then the
// lowest pid) has to compare greatest
impl Ord for Remaining {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .ticks
            .cmp(&self.ticks)
            .then_with(|| other.pid.cmp(&self.pid))
    }
}

impl PartialOrd for Remaining {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    Running,
    Completed,
}

/// Run-time bookkeeping for one admitted process.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub pid: Pid,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub executed_time: Ticks,
    // Ticks run since the last dispatch
    pub consumed_timeslice: Ticks,
    pub response_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining(&self) -> Ticks {
        self.burst_time - self.executed_time
    }

    pub fn is_complete(&self) -> bool {
        self.executed_time == self.burst_time
    }

    /// Time spent in the ready pool, known once the task has completed.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time.map(|t| t - self.burst_time)
    }
}

#[derive(Debug)]
pub enum ReadyPool {
    Fifo {
        tasks: VecDeque<TaskId>,
    },
    Priq {
        tasks: KeyedPriorityQueue<TaskId, Remaining>,
    },
}

impl ReadyPool {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            tasks: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        match self {
            Self::Fifo { tasks } => tasks.contains(&task_id),
            Self::Priq { tasks } => tasks.iter().any(|t| *t.0 == task_id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { tasks } => tasks.len(),
            Self::Priq { tasks } => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// State of the simulated CPU: clock, task table, ready pool and the
/// statistics gathered so far.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub current: Option<TaskId>,
    pub tasks: Vec<Task>,
    pub ready: ReadyPool,
    pub enqueued: FxHashSet<TaskId>,
    pub stats: StatsAccumulator,
    // Tasks in the order they finished
    pub completed: Vec<TaskId>,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            current: None,
            tasks: Vec::new(),
            ready: ReadyPool::new_fifo(),
            enqueued: FxHashSet::default(),
            stats: StatsAccumulator::default(),
            completed: Vec::new(),
        }
    }

    pub fn create_task(&mut self, pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> TaskId {
        let id = self.tasks.len();
        debug_assert!(burst_time > 0, "Task {pid} must need at least one tick");

        self.tasks.push(Task {
            id,
            pid,
            state: TaskState::Ready,
            arrival_time,
            burst_time,
            executed_time: 0,
            consumed_timeslice: 0,
            response_time: None,
            turnaround_time: None,
            completion_time: None,
        });

        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn set_ready_pool(&mut self, pool: ReadyPool) {
        debug_assert!(
            self.ready.is_empty(),
            "Ready pool replaced while tasks are queued"
        );
        self.ready = pool;
    }

    pub fn ready_push(&mut self, task_id: TaskId) {
        assert!(
            !self.enqueued.contains(&task_id),
            "Task {task_id} already present in the ready pool"
        );

        let task = self.task(task_id);
        debug_assert!(
            task.state == TaskState::Ready,
            "Task {task_id} must be Ready when enqueued"
        );
        let key = Remaining {
            ticks: task.remaining(),
            pid: task.pid,
        };

        match &mut self.ready {
            ReadyPool::Fifo { tasks } => tasks.push_back(task_id),
            ReadyPool::Priq { tasks } => {
                tasks.push(task_id, key);
            }
        };

        self.enqueued.insert(task_id);
    }

    pub fn ready_pop(&mut self) -> Option<TaskId> {
        let task = match &mut self.ready {
            ReadyPool::Fifo { tasks } => tasks.pop_front(),
            ReadyPool::Priq { tasks } => tasks.pop().map(|t| t.0),
        }?;

        let removed = self.enqueued.remove(&task);
        debug_assert!(removed, "Task {task} missing ready pool membership");

        Some(task)
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn has_ready_tasks(&self) -> bool {
        !self.ready.is_empty()
    }

    // Returns true on the task's first dispatch
    pub fn set_running(&mut self, task_id: TaskId) -> bool {
        debug_assert!(
            !self.enqueued.contains(&task_id),
            "Running task {task_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a task");

        self.current = Some(task_id);
        let now = self.now;
        let task = self.task_mut(task_id);
        task.state = TaskState::Running;
        task.consumed_timeslice = 0;

        if task.response_time.is_none() {
            task.response_time = Some(now.saturating_sub(task.arrival_time));
            true
        } else {
            false
        }
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }

    pub fn mark_ready(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be ready",
            task.pid
        );
        task.state = TaskState::Ready;
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.enqueued.contains(&task_id),
            "Completing task {task_id} that is still enqueued"
        );

        let now = self.now;
        let task = &mut self.tasks[task_id];
        debug_assert!(
            task.state == TaskState::Running && task.is_complete(),
            "Task {} must have run its full burst before completing",
            task.pid
        );

        let turnaround = now - task.arrival_time;
        let waiting = turnaround - task.burst_time;
        task.state = TaskState::Completed;
        task.completion_time = Some(now);
        task.turnaround_time = Some(turnaround);
        let response = task.response_time.unwrap_or(waiting);

        self.stats.record_completion(waiting, response, turnaround);
        self.completed.push(task_id);
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priq_pops_shortest_remaining_then_lowest_pid() {
        let mut ctx = SchedCtx::new();
        ctx.set_ready_pool(ReadyPool::new_priq());

        let long = ctx.create_task(1, 0, 8);
        let short_high_pid = ctx.create_task(7, 0, 3);
        let short_low_pid = ctx.create_task(4, 0, 3);
        for task in [long, short_high_pid, short_low_pid] {
            ctx.ready_push(task);
        }

        assert_eq!(ctx.ready_pop(), Some(short_low_pid));
        assert_eq!(ctx.ready_pop(), Some(short_high_pid));
        assert_eq!(ctx.ready_pop(), Some(long));
        assert_eq!(ctx.ready_pop(), None);
        assert!(ctx.enqueued.is_empty());
    }

    #[test]
    fn fifo_preserves_insertion_order() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_task(10, 0, 5);
        let b = ctx.create_task(2, 0, 1);
        ctx.ready_push(a);
        ctx.ready_push(b);

        assert!(ctx.ready.contains(b));
        assert_eq!(ctx.ready_pop(), Some(a));
        assert_eq!(ctx.ready_pop(), Some(b));
    }

    #[test]
    fn response_time_is_set_once() {
        let mut ctx = SchedCtx::new();
        let task = ctx.create_task(1, 2, 4);
        ctx.advance_time(5);

        assert!(ctx.set_running(task));
        ctx.clear_cpu();
        ctx.mark_ready(task);
        ctx.advance_time(3);
        assert!(!ctx.set_running(task));
        assert_eq!(ctx.task(task).response_time, Some(3));
    }

    #[test]
    fn completion_records_turnaround_and_waiting() {
        let mut ctx = SchedCtx::new();
        let task = ctx.create_task(1, 1, 2);
        ctx.advance_time(3);
        ctx.set_running(task);
        ctx.task_mut(task).executed_time = 2;
        ctx.advance_time(2);
        ctx.clear_cpu();
        ctx.mark_completed(task);

        let task = ctx.task(task);
        assert_eq!(task.state, TaskState::Completed);
        assert_eq!(task.turnaround_time, Some(4));
        assert_eq!(task.waiting_time(), Some(2));
        assert_eq!(task.completion_time, Some(5));
        assert_eq!(ctx.completed, vec![0]);
    }
}
