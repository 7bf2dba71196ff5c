//! Service caller port: outbound commands to the hub.

use std::future::Future;
use std::sync::Arc;

use cardhub_domain::error::CardHubError;
use cardhub_domain::service::ServiceCall;

/// Invokes services on the hub.
///
/// Callers in this crate never wait on the result to update the UI: a
/// failed call is logged and the next snapshot from the hub corrects any
/// optimistic state.
pub trait ServiceCaller: Send + Sync {
    /// Send one service call.
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), CardHubError>> + Send;
}

impl<T: ServiceCaller> ServiceCaller for Arc<T> {
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), CardHubError>> + Send {
        (**self).call_service(call)
    }
}
