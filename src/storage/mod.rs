pub mod comments;

pub use comments::{CommentStore, NewComment, StorageError};
