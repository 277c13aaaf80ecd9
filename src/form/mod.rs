mod coerce;
mod entry;
mod error;
mod model;
mod session;

pub use coerce::{coerce, convert, convert_str, validate};
pub use entry::{
    Description, DescriptionSegment, EditorKind, Emphasis, FormEntry, REQUIRED_MARKER,
};
pub use error::{CoercionError, CommitError, CommitFailure, FieldFailure, SessionError};
pub use model::FormModel;
pub use session::{EventOutcome, FormEvent, FormSession, ListEdit, ListItem};
