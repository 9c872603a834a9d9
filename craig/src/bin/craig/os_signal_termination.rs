use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use craig::core::termination::TerminationCondition;

/// A [`TerminationCondition`] which is triggered by SIGINT or SIGTERM.
#[derive(Clone, Debug)]
pub(crate) struct OsSignal {
    signal_received: Arc<AtomicBool>,
}

impl OsSignal {
    /// Registers the listeners for the interrupt signals. Once a signal arrives, the replay gives
    /// up before the next derived clause.
    pub(crate) fn install() -> OsSignal {
        let signal_received = Arc::new(AtomicBool::new(false));

        for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
            let _ = signal_hook::flag::register(signal, Arc::clone(&signal_received))
                .expect("failed to register signal listener");
        }

        OsSignal { signal_received }
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.signal_received.load(Ordering::Relaxed)
    }
}
