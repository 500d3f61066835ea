use fxhash::FxHashMap;
use parking_lot::Mutex;
use pforge_kernel::gateway::GatewayError;
use std::collections::VecDeque;
use std::time::Duration;

/// Gateway operations that can be faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    Load,
    Save,
    LoadBrand,
    UpdateBrand,
    ApproachScreens,
}

#[derive(Debug, Default)]
struct Fault {
    message: Option<String>,
    /// Failures left before the op succeeds again; `None` fails forever.
    remaining: Option<u32>,
    delay: Option<Duration>,
    /// Per-call delays consumed in call order, ahead of `delay`.
    queued: VecDeque<Duration>,
}

/// What the gateway should do for one call.
#[derive(Debug, Default)]
pub(crate) struct Verdict {
    pub(crate) delay: Option<Duration>,
    pub(crate) error: Option<GatewayError>,
}

/// Per-operation failure and latency injection.
#[derive(Debug, Default)]
pub struct FailureInjector {
    faults: Mutex<FxHashMap<GatewayOp, Fault>>,
}

impl FailureInjector {
    /// Every call of `op` fails with [`GatewayError::Unavailable`].
    pub fn fail(&self, op: GatewayOp, message: impl Into<String>) {
        let mut faults = self.faults.lock();
        let fault = faults.entry(op).or_default();
        fault.message = Some(message.into());
        fault.remaining = None;
    }

    /// The next `times` calls of `op` fail, later calls succeed.
    pub fn fail_times(&self, op: GatewayOp, times: u32, message: impl Into<String>) {
        let mut faults = self.faults.lock();
        let fault = faults.entry(op).or_default();
        fault.message = Some(message.into());
        fault.remaining = Some(times);
    }

    /// Adds a fixed delay to every call of `op`.
    pub fn delay(&self, op: GatewayOp, delay: Duration) {
        self.faults.lock().entry(op).or_default().delay = Some(delay);
    }

    /// Queues one delay per upcoming call of `op`, in call order.
    pub fn queue_delays(&self, op: GatewayOp, delays: impl IntoIterator<Item = Duration>) {
        self.faults.lock().entry(op).or_default().queued.extend(delays);
    }

    pub fn clear(&self) {
        self.faults.lock().clear();
    }

    pub fn clear_op(&self, op: GatewayOp) {
        self.faults.lock().remove(&op);
    }

    pub(crate) fn check(&self, op: GatewayOp) -> Verdict {
        let mut faults = self.faults.lock();
        let Some(fault) = faults.get_mut(&op) else { return Verdict::default() };

        let delay = fault.queued.pop_front().or(fault.delay);
        let error = match (&fault.message, fault.remaining) {
            (Some(_), Some(0)) | (None, _) => None,
            (Some(message), remaining) => {
                if let Some(left) = remaining {
                    fault.remaining = Some(left - 1);
                }
                Some(GatewayError::Unavailable {
                    message: message.clone().into(),
                    context: Some(format!("{op:?}").into()),
                })
            },
        };
        Verdict { delay, error }
    }
}
