mod forward_post;
mod toast;

pub use forward_post::ForwardPostView;
pub use toast::ToastWidget;
