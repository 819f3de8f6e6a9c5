// Use cases layer: signature checks and the interaction workflows.

pub mod dispatch;
pub mod player_status;
pub mod verify_signature;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::{DispatchUseCase, UNKNOWN_COMMAND_MESSAGE};
pub use player_status::{FETCH_FAILED_MESSAGE, PlayerStatusUseCase, StatusSettings};
pub use verify_signature::{KeyError, SignatureVerifier};
