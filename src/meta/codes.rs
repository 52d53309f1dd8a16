//! Built-in classifications mirroring RPC status semantics.
//!
//! Every runtime registers one meta error per [`Code`] under [`SOURCE`], each
//! carrying its HTTP status through [`STATUS`](crate::STATUS). The statics
//! below are the process runtime's instances.

use super::MetaError;
use crate::runtime;
use std::sync::LazyLock;

/// Source namespace of the built-in classifications.
pub const SOURCE: &str = "error-meta";

/// RPC-style status codes, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Ok,
    Canceled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl Code {
    pub const ALL: [Code; 17] = [
        Code::Ok,
        Code::Canceled,
        Code::Unknown,
        Code::InvalidArgument,
        Code::DeadlineExceeded,
        Code::NotFound,
        Code::AlreadyExists,
        Code::PermissionDenied,
        Code::ResourceExhausted,
        Code::FailedPrecondition,
        Code::Aborted,
        Code::OutOfRange,
        Code::Unimplemented,
        Code::Internal,
        Code::Unavailable,
        Code::DataLoss,
        Code::Unauthenticated,
    ];

    /// Code string, e.g. `not_found(5)`.
    pub const fn code(self) -> &'static str {
        match self {
            Code::Ok => "success(0)",
            Code::Canceled => "canceled(1)",
            Code::Unknown => "unknown(2)",
            Code::InvalidArgument => "invalid_argument(3)",
            Code::DeadlineExceeded => "deadline_exceeded(4)",
            Code::NotFound => "not_found(5)",
            Code::AlreadyExists => "already_exists(6)",
            Code::PermissionDenied => "permission_denied(7)",
            Code::ResourceExhausted => "resource_exhausted(8)",
            Code::FailedPrecondition => "failed_precondition(9)",
            Code::Aborted => "aborted(10)",
            Code::OutOfRange => "out_of_range(11)",
            Code::Unimplemented => "unimplemented(12)",
            Code::Internal => "internal(13)",
            Code::Unavailable => "unavailable(14)",
            Code::DataLoss => "data_loss(15)",
            Code::Unauthenticated => "unauthenticated(16)",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Code::Ok => "success",
            Code::Canceled => "client cancelled request",
            Code::Unknown => "server throws an exception",
            Code::InvalidArgument => "invalid argument",
            Code::DeadlineExceeded => "timeout",
            Code::NotFound => "not found",
            Code::AlreadyExists => "already exists",
            Code::PermissionDenied => "permission denied",
            Code::ResourceExhausted => "resource exhausted",
            Code::FailedPrecondition => "failed precondition",
            Code::Aborted => "operation was aborted",
            Code::OutOfRange => "operation was attempted past the valid range",
            Code::Unimplemented => "unimplemented",
            Code::Internal => "internal error",
            Code::Unavailable => "service is unavailable",
            Code::DataLoss => "unrecoverable data loss or corruption",
            Code::Unauthenticated => "unauthenticated",
        }
    }

    /// Default HTTP status.
    pub const fn status(self) -> u16 {
        match self {
            Code::Ok => 200,
            Code::Canceled => 499,
            Code::Unknown | Code::Internal | Code::DataLoss => 500,
            Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => 400,
            Code::DeadlineExceeded => 504,
            Code::NotFound => 404,
            Code::AlreadyExists | Code::Aborted => 409,
            Code::PermissionDenied | Code::Unauthenticated => 403,
            Code::ResourceExhausted => 429,
            Code::Unimplemented => 501,
            Code::Unavailable => 503,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

macro_rules! process_codes {
    ($($(#[$doc:meta])* $name:ident => $code:ident,)*) => {
        $(
            $(#[$doc])*
            pub static $name: LazyLock<MetaError> = LazyLock::new(|| runtime::process().code(Code::$code));
        )*
    };
}

process_codes! {
    OK => Ok,
    CANCELED => Canceled,
    /// Fallback guard used when an adapter is given none.
    UNKNOWN => Unknown,
    INVALID_ARGUMENT => InvalidArgument,
    DEADLINE_EXCEEDED => DeadlineExceeded,
    /// Also classifies the runtime's own lookup misses.
    NOT_FOUND => NotFound,
    ALREADY_EXISTS => AlreadyExists,
    PERMISSION_DENIED => PermissionDenied,
    RESOURCE_EXHAUSTED => ResourceExhausted,
    FAILED_PRECONDITION => FailedPrecondition,
    ABORTED => Aborted,
    OUT_OF_RANGE => OutOfRange,
    UNIMPLEMENTED => Unimplemented,
    INTERNAL => Internal,
    UNAVAILABLE => Unavailable,
    DATA_LOSS => DataLoss,
    UNAUTHENTICATED => Unauthenticated,
}
