use thiserror::Error;

/// Typed outcomes for every core operation.
///
/// Callers translate these into their transport of choice; the core never
/// retries and never reports a failure as a silent no-op.
#[derive(Error, Debug)]
pub enum ForumError {
    #[error("Operation forbidden for this actor")]
    Forbidden,

    #[error("Author is banned")]
    UserBanned,

    #[error("Author is permanently banned")]
    UserPermanentlyBanned,

    #[error("Message not found")]
    MessageNotFound,

    #[error("Thread not found")]
    ThreadNotFound,

    #[error("Forum not found")]
    ForumNotFound,

    #[error("Member not found")]
    MemberNotFound,

    #[error("Message is already published")]
    MessageAlreadyPublished,

    #[error("Message is not published")]
    MessageNotPublished,

    #[error("Message has comments")]
    MessageHasComments,

    #[error("Forum is read-only")]
    ForumReadOnly,

    #[error("Message is already a thread root")]
    MessageAlreadyRoot,

    #[error("Rating value {0} is out of range (1-5)")]
    RatingOutOfRange(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
