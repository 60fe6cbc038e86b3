use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Layout switches of the dashboard chrome. Every switch is off by default.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct LayoutFlags: u32 {
        const BOXED_LAYOUT = 1 << 0;
        const HEADER_HIDE = 1 << 1;
        const HEADER_SEARCH_TOGGLED = 1 << 2;
        const SIDEBAR_COLLAPSED = 1 << 3;
        const SIDEBAR_MOBILE_TOGGLED = 1 << 4;
        const SIDEBAR_MOBILE_CLOSED = 1 << 5;
        const SIDEBAR_HIDE = 1 << 6;
        const CONTENT_FULL_HEIGHT = 1 << 7;
        const TOP_NAV = 1 << 8;
        const FOOTER = 1 << 9;
        const FOOTER_FIXED = 1 << 10;
    }
}

impl Default for LayoutFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayoutFlags {
    /// Flips the sidebar between collapsed and expanded.
    pub fn toggle_sidebar(&mut self) {
        self.toggle(Self::SIDEBAR_COLLAPSED);
    }

    /// Mobile sidebar toggling also clears the "closed" marker, and vice versa.
    pub fn toggle_mobile_sidebar(&mut self) {
        if self.contains(Self::SIDEBAR_MOBILE_TOGGLED) {
            self.remove(Self::SIDEBAR_MOBILE_TOGGLED);
            self.insert(Self::SIDEBAR_MOBILE_CLOSED);
        } else {
            self.remove(Self::SIDEBAR_MOBILE_CLOSED);
            self.insert(Self::SIDEBAR_MOBILE_TOGGLED);
        }
    }
}

impl From<&str> for LayoutFlags {
    fn from(s: &str) -> Self {
        match s {
            "boxed" => Self::BOXED_LAYOUT,
            "header-hide" => Self::HEADER_HIDE,
            "header-search" => Self::HEADER_SEARCH_TOGGLED,
            "sidebar-collapsed" => Self::SIDEBAR_COLLAPSED,
            "sidebar-mobile-toggled" => Self::SIDEBAR_MOBILE_TOGGLED,
            "sidebar-mobile-closed" => Self::SIDEBAR_MOBILE_CLOSED,
            "sidebar-hide" => Self::SIDEBAR_HIDE,
            "full-height" => Self::CONTENT_FULL_HEIGHT,
            "top-nav" => Self::TOP_NAV,
            "footer" => Self::FOOTER,
            "footer-fixed" => Self::FOOTER | Self::FOOTER_FIXED,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for LayoutFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for LayoutFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for LayoutFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}
