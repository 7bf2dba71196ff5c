//! Command dispatch: fire-and-forget service calls, immediate or debounced.

use std::sync::Arc;
use std::time::Duration;

use cardhub_domain::id::FeatureId;
use cardhub_domain::service::ServiceCall;

use crate::debounce::Debouncer;
use crate::ports::ServiceCaller;

/// Sends service calls on behalf of card features.
///
/// Discrete actions (mode taps, mute, transport buttons) go out at once;
/// continuous edits (setpoints) wait for a quiet period keyed by the
/// feature instance. Neither path reports back to the caller: failures are
/// logged and left for the next hub snapshot to correct.
pub struct CommandDispatcher<C> {
    caller: Arc<C>,
    debouncer: Debouncer<FeatureId>,
}

impl<C> CommandDispatcher<C>
where
    C: ServiceCaller + 'static,
{
    pub fn new(caller: Arc<C>, delay: Duration) -> Self {
        Self {
            caller,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Send `call` now, without waiting for the hub to answer.
    pub fn send(&self, call: ServiceCall) {
        tokio::spawn(execute(Arc::clone(&self.caller), call));
    }

    /// Send `call` once `key` has been quiet for the debounce delay.
    ///
    /// A later call for the same key replaces this one.
    pub fn send_debounced(&self, key: FeatureId, call: ServiceCall) {
        tracing::debug!(%key, %call, "scheduling debounced service call");
        let caller = Arc::clone(&self.caller);
        self.debouncer.schedule(key, move || execute(caller, call));
    }
}

impl<C> CommandDispatcher<C> {
    /// Forget the pending debounced call of `key`, if any.
    pub fn cancel(&self, key: FeatureId) -> bool {
        self.debouncer.cancel(&key)
    }

    #[must_use]
    pub fn is_pending(&self, key: FeatureId) -> bool {
        self.debouncer.is_pending(&key)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }
}

async fn execute<C: ServiceCaller>(caller: Arc<C>, call: ServiceCall) {
    tracing::debug!(%call, data = %call.data, "calling service");
    if let Err(err) = caller.call_service(call.clone()).await {
        tracing::warn!(%call, error = ?err, "service call failed");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingCaller, settle};
    use super::*;
    use crate::debounce::DEFAULT_DELAY;
    use cardhub_domain::id::EntityId;

    fn call(temperature: f64) -> ServiceCall {
        let id = EntityId::parse("climate.office").unwrap();
        ServiceCall::new("climate", "set_temperature", &id).with("temperature", temperature)
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_immediately_without_debounce() {
        let caller = Arc::new(RecordingCaller::default());
        let dispatcher = CommandDispatcher::new(Arc::clone(&caller), DEFAULT_DELAY);

        dispatcher.send(call(20.0));
        settle(1).await;

        assert_eq!(caller.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_coalesce_debounced_calls_per_feature() {
        let caller = Arc::new(RecordingCaller::default());
        let dispatcher = CommandDispatcher::new(Arc::clone(&caller), DEFAULT_DELAY);
        let key = FeatureId::new();

        dispatcher.send_debounced(key, call(20.0));
        settle(300).await;
        dispatcher.send_debounced(key, call(21.0));
        settle(1_100).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("temperature"), Some(&serde_json::json!(21.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_swallow_failed_calls() {
        let caller = Arc::new(RecordingCaller::failing());
        let dispatcher = CommandDispatcher::new(Arc::clone(&caller), DEFAULT_DELAY);

        dispatcher.send(call(20.0));
        settle(1).await;

        assert_eq!(caller.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_pending_call_on_cancel() {
        let caller = Arc::new(RecordingCaller::default());
        let dispatcher = CommandDispatcher::new(Arc::clone(&caller), DEFAULT_DELAY);
        let key = FeatureId::new();

        dispatcher.send_debounced(key, call(20.0));
        assert!(dispatcher.is_pending(key));
        assert!(dispatcher.cancel(key));
        settle(2_000).await;

        assert!(caller.calls().is_empty());
    }
}
