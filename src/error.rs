use std::{collections::TryReserveError, error, fmt, io};

/// What went wrong, structurally.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// All [`MAX_READERS`](crate::MAX_READERS) reader slots are taken.
    TooManyReaders,
    /// Storage for the buffer items cannot be allocated.
    Alloc,
    /// Reader registry cannot grow for a reason unrelated to the reader limit.
    Container,
    /// Writer accepted less data than was handed to it.
    Write,
}

/// Operation that failed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operation {
    /// [`FanoutRb::new`](crate::FanoutRb::new).
    New,
    /// [`FanoutRb::try_clone`](crate::FanoutRb::try_clone).
    Clone,
    /// [`FanoutRb::register`](crate::FanoutRb::register).
    Register,
    /// [`ReadSession::write_into`](crate::ReadSession::write_into).
    WriteInto,
}

/// Step of the operation that failed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Allocate,
    AddReader,
    ReaderCursor,
    CopyData,
}

#[derive(Debug)]
enum Cause {
    Alloc(TryReserveError),
    Io(io::Error),
}

/// Ring buffer error.
///
/// Carries the failed operation and the step inside it along with the original lower-level error, if any.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    operation: Operation,
    action: Action,
    cause: Option<Cause>,
}

impl Error {
    pub(crate) fn too_many_readers() -> Self {
        Self {
            kind: ErrorKind::TooManyReaders,
            operation: Operation::Register,
            action: Action::AddReader,
            cause: None,
        }
    }

    pub(crate) fn alloc(operation: Operation, err: TryReserveError) -> Self {
        Self {
            kind: ErrorKind::Alloc,
            operation,
            action: Action::Allocate,
            cause: Some(Cause::Alloc(err)),
        }
    }

    pub(crate) fn container(operation: Operation, action: Action, err: TryReserveError) -> Self {
        Self {
            kind: ErrorKind::Container,
            operation,
            action,
            cause: Some(Cause::Alloc(err)),
        }
    }

    pub(crate) fn write(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Write,
            operation: Operation::WriteInto,
            action: Action::CopyData,
            cause: Some(Cause::Io(err)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
    pub fn operation(&self) -> Operation {
        self.operation
    }
    pub fn action(&self) -> Action {
        self.action
    }

    /// Whether the error wraps a lower-level error.
    pub fn has_cause(&self) -> bool {
        self.cause.is_some()
    }

    /// Diagnostic text of the wrapped lower-level error.
    pub fn cause_message(&self) -> Option<String> {
        self.cause.as_ref().map(|cause| match cause {
            Cause::Alloc(e) => e.to_string(),
            Cause::Io(e) => e.to_string(),
        })
    }

    /// Unwraps the underlying I/O error of a [`ErrorKind::Write`] failure.
    pub fn into_io(self) -> Option<io::Error> {
        match self.cause {
            Some(Cause::Io(e)) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::TooManyReaders => "too many readers for a ring buffer",
            ErrorKind::Alloc => "allocation failed",
            ErrorKind::Container => "reader registry operation failed",
            ErrorKind::Write => "writer accepted less data than requested",
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::New => "FanoutRb::new",
            Operation::Clone => "FanoutRb::try_clone",
            Operation::Register => "FanoutRb::register",
            Operation::WriteInto => "ReadSession::write_into",
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Allocate => "allocate space for the ring buffer",
            Action::AddReader => "add a new reader",
            Action::ReaderCursor => "create a cursor for the reader",
            Action::CopyData => "copy the data to the writer",
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} could not {}", self.kind, self.operation, self.action)?;
        if let Some(message) = self.cause_message() {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.cause {
            Some(Cause::Alloc(e)) => Some(e),
            Some(Cause::Io(e)) => Some(e),
            None => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
