use chrono::{DateTime, Utc};

use crate::domain::Clock;
use crate::use_cases::{DispatchUseCase, SignatureVerifier};

// Immutable per-process state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub verifier: SignatureVerifier,
    // The dispatcher holds the player source as Arc<dyn PlayerSource> (dependency injection).
    pub dispatch: DispatchUseCase,
}

// System clock adapter used by the status commands.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
