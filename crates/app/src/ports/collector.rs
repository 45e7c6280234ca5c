//! Collector port: the remote service that ingests cycle records.

use std::future::Future;

use envmon_domain::payload::CollectorPayload;
use envmon_domain::transmission::TransmissionOutcome;

/// Posts one payload to the collector.
///
/// Implementations apply their own bounded timeout and classify every
/// result, so a send never fails: HTTP 201 is [`TransmissionOutcome::Sent`],
/// any other answer is [`TransmissionOutcome::Rejected`], and a transport
/// failure is [`TransmissionOutcome::Unreachable`].
pub trait CollectorPort {
    /// Send the payload and classify the result.
    fn send(
        &self,
        payload: &CollectorPayload,
    ) -> impl Future<Output = TransmissionOutcome> + Send;
}

impl<T: CollectorPort + Send + Sync> CollectorPort for std::sync::Arc<T> {
    fn send(
        &self,
        payload: &CollectorPayload,
    ) -> impl Future<Output = TransmissionOutcome> + Send {
        (**self).send(payload)
    }
}
