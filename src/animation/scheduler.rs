use crate::animation::animator::TIME_EPSILON;

/// A follow-up action addressed by a stable key rather than by a reference
/// to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask<K, T> {
    /// Seconds until the task comes due.
    pub remaining: f32,
    pub key: K,
    pub task: T,
}

/// Delayed tasks on the frame clock. Nothing runs on its own: `advance` hands
/// back whatever came due and the caller decides whether the key is still
/// valid before acting on it.
#[derive(Debug)]
pub struct TaskScheduler<K, T> {
    tasks: Vec<ScheduledTask<K, T>>,
}

impl<K: Copy + PartialEq, T> TaskScheduler<K, T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn schedule_after(&mut self, delay: f32, key: K, task: T) {
        self.tasks.push(ScheduledTask {
            remaining: delay.max(0.0),
            key,
            task,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counts `dt` off every pending task and returns the ones that came due,
    /// earliest first. Tasks only hold their own countdown, so precision does
    /// not degrade however long the session runs.
    pub fn advance(&mut self, dt: f32) -> Vec<(K, T)> {
        let dt = dt.max(0.0);
        for task in &mut self.tasks {
            task.remaining -= dt;
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .tasks
            .drain(..)
            .partition(|task| task.remaining <= TIME_EPSILON);
        self.tasks = pending;

        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|task| (task.key, task.task)).collect()
    }
}

impl<K: Copy + PartialEq, T> Default for TaskScheduler<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_when_due() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_after(0.2, 7u32, "detach");

        assert!(scheduler.advance(0.1).is_empty());
        assert_eq!(scheduler.advance(0.1), vec![(7, "detach")]);
        assert!(scheduler.advance(1.0).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_time_order() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_after(0.5, 1u32, 'b');
        scheduler.schedule_after(0.1, 2u32, 'a');

        assert_eq!(scheduler.advance(1.0), vec![(2, 'a'), (1, 'b')]);
    }

    #[test]
    fn deadlines_hold_after_a_long_session() {
        let mut scheduler = TaskScheduler::new();
        let frame = 1.0 / 60.0;

        // A day of frames, long enough for an f32 clock to stop advancing.
        for _ in 0..(60 * 60 * 60 * 24) {
            assert!(scheduler.advance(frame).is_empty());
        }

        scheduler.schedule_after(0.2, 1u32, ());
        for _ in 0..11 {
            assert!(scheduler.advance(frame).is_empty());
        }
        assert_eq!(scheduler.advance(frame), vec![(1, ())]);
    }

    #[test]
    fn zero_delay_fires_on_the_next_advance() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_after(0.0, 3u32, ());
        scheduler.schedule_after(0.5, 4u32, ());

        assert_eq!(scheduler.advance(0.0), vec![(3, ())]);
        assert!(!scheduler.is_empty());
    }
}
