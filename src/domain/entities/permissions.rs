use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Channel-scoped permissions the current user holds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Permissions: u32 {
        const CREATE_POST = 1 << 0;
        const USE_CHANNEL_MENTIONS = 1 << 1;
        const ADD_REACTION = 1 << 2;
    }
}
