//! Pure derivations over the store snapshot.

pub mod post_list;
pub mod root_posts;
pub mod toast;
pub mod unread;

pub use post_list::{PostListItem, PostListOptions, prepare_post_ids_for_post_list};
pub use root_posts::root_post_ids;
pub use toast::{ToastDecision, ToastKind, ToastProps, decide_toast};
pub use unread::count_unreads_below;
