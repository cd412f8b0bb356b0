//! Fixed-interval polling of a resource's observed state
//!
//! App Service state transitions (start, stop, restart) are not modeled as
//! tasks by ARM; the only way to observe them is to re-fetch the site until
//! its `state` matches the expectation. [`wait_for_state`] is the generic
//! loop; [`wait_for_site_state`] binds it to a web app or deployment slot.
//!
//! The loop waits one full interval before the first check (a freshly
//! issued transition never reflects instantly) and tracks the deadline by
//! summing intervals rather than reading the wall clock, so a slow fetch
//! does not eat into the attempt budget.

use std::future::Future;
use std::time::Duration;

use azure_arm::{Site, WebAppHandler};

use crate::error::{CoreError, Result};

/// Default wait between state fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5_000);

/// Default total budget before the poll fails
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Poll `fetch` until it reports a state equal (case-insensitively) to
/// `target`, or the summed intervals reach `timeout`.
///
/// The first fetch happens only after one full `interval` has elapsed.
/// A fetch error aborts the poll immediately and is distinct from the
/// [`CoreError::StateTimeout`] raised when the deadline passes without a
/// match; the timeout error names `resource` and `target` for diagnostics.
///
/// The suspension point is `tokio::time::sleep`; no thread is held between
/// checks, so concurrent polls of independent resources are fine.
pub async fn wait_for_state<F, Fut>(
    mut fetch: F,
    resource: &str,
    target: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let mut waited = Duration::ZERO;
    loop {
        tokio::time::sleep(interval).await;
        let state = fetch().await?;
        if state.eq_ignore_ascii_case(target) {
            return Ok(());
        }
        waited += interval;
        if waited >= timeout {
            return Err(CoreError::StateTimeout {
                site: resource.to_string(),
                state: target.to_string(),
            });
        }
    }
}

/// Wait until a web app (or one of its deployment slots) reaches `target`.
///
/// The poll target is the composite key (resource group, base name,
/// optional slot): slots are fetched through the slot route, top-level
/// sites through the site route. The slot is derived from the site's
/// `parent/slot` name encoding.
pub async fn wait_for_site_state(
    handler: &WebAppHandler,
    subscription_id: &str,
    resource_group: &str,
    site: &Site,
    target: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<()> {
    let name = site.base_name();
    let slot = site.slot_name();

    let fetch = move || {
        let handler = handler;
        async move {
            let current = match slot {
                Some(slot) => {
                    handler
                        .get_slot(subscription_id, resource_group, name, slot)
                        .await?
                }
                None => handler.get(subscription_id, resource_group, name).await?,
            };
            Ok(current.state().unwrap_or_default().to_string())
        }
    };

    wait_for_state(fetch, site.base_name(), target, interval, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[tokio::test(start_paused = true)]
    async fn matching_state_completes_after_one_interval_and_one_fetch() {
        let fetches = Cell::new(0);
        let start = Instant::now();

        wait_for_state(
            || {
                fetches.set(fetches.get() + 1);
                async { Ok("Running".to_string()) }
            },
            "my-app",
            "running",
            secs(5),
            secs(60),
        )
        .await
        .unwrap();

        assert_eq!(fetches.get(), 1);
        // no check at t=0: the single fetch was issued after one interval
        assert_eq!(start.elapsed(), secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_after_exactly_four_attempts() {
        let fetches = Cell::new(0);
        let start = Instant::now();

        let err = wait_for_state(
            || {
                fetches.set(fetches.get() + 1);
                async { Ok("Stopped".to_string()) }
            },
            "my-app",
            "Running",
            secs(5),
            secs(20),
        )
        .await
        .unwrap_err();

        // attempts at elapsed 5s, 10s, 15s, 20s; no 5th
        assert_eq!(fetches.get(), 4);
        assert_eq!(start.elapsed(), secs(20));
        match err {
            CoreError::StateTimeout { site, state } => {
                assert_eq!(site, "my-app");
                assert_eq!(state, "Running");
            }
            other => panic!("expected StateTimeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn state_match_is_case_insensitive() {
        let states = Cell::new(0);
        wait_for_state(
            || {
                states.set(states.get() + 1);
                async { Ok("RUNNING".to_string()) }
            },
            "my-app",
            "running",
            secs(5),
            secs(60),
        )
        .await
        .unwrap();
        assert_eq!(states.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn eventually_matching_state_succeeds_before_deadline() {
        let fetches = Cell::new(0);
        wait_for_state(
            || {
                fetches.set(fetches.get() + 1);
                let n = fetches.get();
                async move {
                    Ok(if n < 3 { "Stopped" } else { "Running" }.to_string())
                }
            },
            "my-app",
            "Running",
            secs(5),
            secs(60),
        )
        .await
        .unwrap();
        assert_eq!(fetches.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_error_aborts_immediately() {
        let fetches = Cell::new(0);
        let err = wait_for_state(
            || {
                fetches.set(fetches.get() + 1);
                async {
                    Err(CoreError::Arm(azure_arm::ArmError::NotFound {
                        message: "gone".to_string(),
                    }))
                }
            },
            "my-app",
            "Running",
            secs(5),
            secs(60),
        )
        .await
        .unwrap_err();

        assert_eq!(fetches.get(), 1);
        assert!(err.is_not_found());
        assert!(!err.is_state_timeout());
    }
}
