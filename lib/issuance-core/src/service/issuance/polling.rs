use std::fmt::Display;
use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::dto::PollTarget;
use crate::config::core_config::PollingConfig;
use crate::provider::issuance_service_client::error::IssuanceServiceClientError;
use crate::service::error::ServiceError;
use crate::util::sleeper::Sleeper;

pub(super) struct PollOutcome<T> {
    pub value: T,
    pub attempts: u32,
}

/// Polls until `is_terminal` accepts the observed value.
///
/// The first poll happens immediately, `poll_interval` separates consecutive polls.
/// `check_failure` may end the loop early with an error. Client errors abort at once.
pub(super) async fn poll_until<T, Fut>(
    sleeper: &dyn Sleeper,
    policy: &PollingConfig,
    target: PollTarget,
    cancellation_token: &CancellationToken,
    mut poll: impl FnMut() -> Fut,
    is_terminal: impl Fn(&T) -> bool,
    check_failure: impl Fn(T) -> Result<T, ServiceError>,
) -> Result<PollOutcome<T>, ServiceError>
where
    T: Display,
    Fut: Future<Output = Result<T, IssuanceServiceClientError>>,
{
    let polling = async {
        let mut attempts = 0;
        loop {
            let value = poll().await?;
            attempts += 1;
            tracing::info!(%target, attempt = attempts, "Observed `{value}`");

            if is_terminal(&value) {
                return Ok(PollOutcome { value, attempts });
            }

            let value = check_failure(value)?;

            if policy.max_attempts.is_some_and(|max| attempts >= max) {
                tracing::warn!(%target, "Giving up after {attempts} polls");
                return Err(ServiceError::PollingExhausted {
                    target,
                    attempts,
                    last_value: value.to_string(),
                });
            }

            sleeper.sleep(policy.poll_interval).await;
        }
    };

    let bounded = async {
        match policy.deadline {
            Some(deadline) => tokio::time::timeout(deadline, polling)
                .await
                .map_err(|_| ServiceError::DeadlineExceeded { target, deadline })?,
            None => polling.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancellation_token.cancelled() => Err(ServiceError::Cancelled),
        result = bounded => result,
    }
}
