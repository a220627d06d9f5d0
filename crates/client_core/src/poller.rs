use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A recurring task that lives exactly as long as its handle.
pub struct Poller {
    task: JoinHandle<()>,
}

impl Poller {
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !tick().await {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {}
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
