/// Identity of the cycle currently being processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub height: u64,
    /// Block time, unix nanoseconds.
    pub time_nanos: u64,
}

pub trait HeaderService: Send + Sync {
    fn header(&self) -> Header;
}
