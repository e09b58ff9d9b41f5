/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be delivered or the service rejected it
    /// (connection failure, timeout, non-2xx status).
    Transport,
    /// The service replied with a payload that does not match the
    /// expected shape (malformed JSON, empty choices, empty content).
    Protocol,
    /// Any other errors.
    Other,
}
