use core::fmt;

/// Human-readable state of a ring buffer at some point in time.
///
/// Cursor fields are present only when taken inside a reader session.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub name: String,
    pub tail: usize,
    pub cursor: Option<usize>,
    pub head: usize,
    pub ahead: Option<usize>,
    pub free: usize,
}

struct OrUnknown(Option<usize>);

impl fmt::Display for OrUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("??"),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RB {}: tail = {}; current = {}; head = {}; ahead = {}; free = {}",
            self.name,
            self.tail,
            OrUnknown(self.cursor),
            self.head,
            OrUnknown(self.ahead),
            self.free
        )
    }
}
