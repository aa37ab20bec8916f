// Run one cloud call and fold transport faults into the calling stage's
// error type. Every remote stage goes through here so no `serialbot_api`
// error escapes a stage boundary unconverted.

use std::future::Future;

use tracing::warn;

pub(crate) async fn remote<T, E>(
    call: impl Future<Output = Result<T, serialbot_api::Error>>,
    wrap: impl FnOnce(String) -> E,
) -> Result<T, E> {
    call.await.map_err(|err| {
        warn!(error = %err, timeout = err.is_timeout(), "cloud call failed");
        wrap(err.summary())
    })
}
