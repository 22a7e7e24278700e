use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("sindhu.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("sindhu.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("sindhu.client.request_duration_seconds");

pub(crate) static SESSIONS_CREATED: Counter = Counter::new("sindhu.sessions.created");
pub(crate) static SESSION_CREATE_FAILURES: Counter =
    Counter::new("sindhu.sessions.create_failures");
pub(crate) static SESSIONS_DELETED: Counter = Counter::new("sindhu.sessions.deleted");
pub(crate) static SESSION_DELETE_FAILURES: Counter =
    Counter::new("sindhu.sessions.delete_failures");

pub(crate) static SENDS_ISSUED: Counter = Counter::new("sindhu.send.issued");
pub(crate) static SENDS_REJECTED: Counter = Counter::new("sindhu.send.rejected");
pub(crate) static SENDS_FAILED: Counter = Counter::new("sindhu.send.failed");
pub(crate) static SENDS_TIMED_OUT: Counter = Counter::new("sindhu.send.timed_out");
pub(crate) static REPLIES_ORPHANED: Counter = Counter::new("sindhu.send.replies_orphaned");
pub(crate) static SEND_ROUND_TRIP: Moments = Moments::new("sindhu.send.round_trip_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSIONS_CREATED);
    collector.register_counter(&SESSION_CREATE_FAILURES);
    collector.register_counter(&SESSIONS_DELETED);
    collector.register_counter(&SESSION_DELETE_FAILURES);

    collector.register_counter(&SENDS_ISSUED);
    collector.register_counter(&SENDS_REJECTED);
    collector.register_counter(&SENDS_FAILED);
    collector.register_counter(&SENDS_TIMED_OUT);
    collector.register_counter(&REPLIES_ORPHANED);
    collector.register_moments(&SEND_ROUND_TRIP);
}
