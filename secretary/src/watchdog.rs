use std::{fmt, sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, Interval, MissedTickBehavior},
};

use crate::{error::StorageError, storages::HealthCheckTrait};

/// Paces the watchdog between pings
#[async_trait::async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self);
}

/// Ticks every `period`, first tick one period after creation
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Storage stayed unreachable through every retry
#[derive(Debug)]
pub struct WatchdogFailure {
    pub attempts: u32,
    pub last_error: StorageError,
}

impl fmt::Display for WatchdogFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storage unreachable after {} attempts, last error: {}",
            self.attempts, self.last_error
        )
    }
}

/// Periodic connectivity check of the storage
pub struct Watchdog {
    retry_attempts: u32,
}

impl Watchdog {
    pub fn new(retry_attempts: u32) -> Self {
        Self { retry_attempts }
    }

    /// Ping on every tick until the storage fails the initial ping and all retries
    pub async fn run<T: Ticker + ?Sized>(
        &self,
        ticker: &mut T,
        target: &dyn HealthCheckTrait,
    ) -> WatchdogFailure {
        loop {
            ticker.tick().await;
            let Err(err) = target.ping().await else {
                log::debug!("Storage ping ok");
                continue;
            };
            log::warn!("Storage ping failed: {}", err);

            if let Err(failure) = self.retry(ticker, target, err).await {
                return failure;
            }
        }
    }

    async fn retry<T: Ticker + ?Sized>(
        &self,
        ticker: &mut T,
        target: &dyn HealthCheckTrait,
        mut last_error: StorageError,
    ) -> Result<(), WatchdogFailure> {
        for attempt in 1..=self.retry_attempts {
            ticker.tick().await;
            match target.ping().await {
                Ok(()) => {
                    log::info!("Storage connection restored after {} retries", attempt);
                    return Ok(());
                }
                Err(err) => {
                    log::warn!(
                        "Storage retry {}/{} failed: {}",
                        attempt,
                        self.retry_attempts,
                        err
                    );
                    last_error = err;
                }
            }
        }
        Err(WatchdogFailure {
            attempts: self.retry_attempts + 1,
            last_error,
        })
    }

    /// Run on a tokio task with an interval ticker
    pub fn spawn(
        self,
        period: Duration,
        target: Arc<dyn HealthCheckTrait>,
    ) -> JoinHandle<WatchdogFailure> {
        tokio::spawn(async move {
            let mut ticker = IntervalTicker::new(period);
            self.run(&mut ticker, target.as_ref()).await
        })
    }
}
