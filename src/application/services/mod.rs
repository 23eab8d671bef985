pub mod channel_search;
pub mod forward_post;
pub mod markdown_shortcuts;
pub mod option_format;
pub mod root_post_props;
pub mod toast_service;

pub use channel_search::{ChannelOption, ChannelSearchService, OptionGroup};
pub use forward_post::{ComposerAction, ForwardPostModal, ForwardRequest};
pub use markdown_shortcuts::{MarkdownEdit, MarkdownMode, apply_markdown};
pub use option_format::{FormattedOption, format_option};
pub use root_post_props::RootPostProps;
pub use toast_service::{ToastConnector, ToastOwnProps};
