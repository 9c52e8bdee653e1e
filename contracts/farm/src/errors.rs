use common::OwnableError;
use soroban_sdk::contracttype;

/// Error categories for classifying farm failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Lifecycle and input validation failures
    Validation = 1,
    /// Caller lacks the required identity
    Authorization = 2,
    /// Referenced pool does not exist
    NotFound = 3,
    /// Request conflicts with current ledger state
    StateConflict = 4,
    /// A token collaborator call failed
    External = 5,
    /// Fixed-point arithmetic or accounting defect
    Arithmetic = 6,
}

/// Contract errors. Discriminants are part of the public interface: batch
/// reports carry them for calls that were skipped.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FarmError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    NotPendingOwner = 4,
    UnknownPool = 10,
    DuplicateAsset = 11,
    TokensIdentical = 12,
    InsufficientStake = 20,
    ZeroAddressRecipient = 21,
    InvalidInput = 22,
    Paused = 30,
    AssetTransferFailed = 40,
    ArithmeticOverflow = 50,
    /// A pending reward computed negative. Never a legitimate value.
    AccountingViolation = 51,
}

impl FarmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FarmError::NotInitialized
            | FarmError::AlreadyInitialized
            | FarmError::InvalidInput
            | FarmError::ZeroAddressRecipient => ErrorCategory::Validation,
            FarmError::NotOwner | FarmError::NotPendingOwner => ErrorCategory::Authorization,
            FarmError::UnknownPool => ErrorCategory::NotFound,
            FarmError::DuplicateAsset
            | FarmError::TokensIdentical
            | FarmError::InsufficientStake
            | FarmError::Paused => ErrorCategory::StateConflict,
            FarmError::AssetTransferFailed => ErrorCategory::External,
            FarmError::ArithmeticOverflow | FarmError::AccountingViolation => {
                ErrorCategory::Arithmetic
            }
        }
    }

    /// Whether resubmitting the same call later can succeed without any
    /// other party acting first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FarmError::Paused | FarmError::AssetTransferFailed)
    }
}

impl From<OwnableError> for FarmError {
    fn from(err: OwnableError) -> Self {
        match err {
            OwnableError::NotOwner => FarmError::NotOwner,
            OwnableError::NotPendingOwner => FarmError::NotPendingOwner,
            OwnableError::InvalidOwner => FarmError::InvalidInput,
        }
    }
}
