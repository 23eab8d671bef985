//! Forward-post error types.

use thiserror::Error;

/// Reasons a forward cannot be sent.
///
/// These are shown inline in the modal and never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error("select a channel or person to forward to")]
    NoChannelSelected,

    #[error("you do not have permission to post in {channel}")]
    PermissionDenied { channel: String },

    #[error("message is too long: {length} of {max} characters")]
    MessageTooLong { length: usize, max: usize },

    #[error("the post to forward is no longer available")]
    PostUnavailable,
}

impl ForwardError {
    /// Creates permission denied error.
    #[must_use]
    pub fn permission_denied(channel: impl Into<String>) -> Self {
        Self::PermissionDenied {
            channel: channel.into(),
        }
    }

    /// Returns whether the user can fix the error by editing the comment.
    #[must_use]
    pub const fn is_comment_error(&self) -> bool {
        matches!(self, Self::MessageTooLong { .. })
    }
}
