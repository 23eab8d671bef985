mod channel_search_port;

pub use channel_search_port::ChannelSearchPort;
