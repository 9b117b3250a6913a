use bitflags::bitflags;

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShareOptions: u64 {
        /// Are we on light theme?
        const LightTheme = 1 << 0;

        /// Debug controls, frame stats
        const Debug = 1 << 1;

        /// Render share menus inline, the way small screens host them
        const Mobile = 1 << 2;

        /// Pretend the platform has a share sheet (opens a mail draft)
        const NativeShare = 1 << 3;
    }
}

impl Default for ShareOptions {
    fn default() -> Self {
        ShareOptions::empty()
    }
}
