use mcs_animate::{Animator, DEFAULT_SLIDE_DURATION, ElementId, RenderSurface, Result};
use mcs_domain::layout::LayoutFlags;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Keeps the sidebar layout switches and the sidebar elements in step.
///
/// Collapsing slides the sidebar up, expanding slides it down. The flags only change once the
/// transition was accepted, so a detached sidebar leaves the layout untouched.
pub struct SidebarController<S: RenderSurface + ?Sized> {
    animator: Animator<S>,
    sidebar: ElementId,
    mobile_sidebar: Option<ElementId>,
    layout: LayoutFlags,
    duration: Duration,
}

impl<S: RenderSurface + ?Sized> fmt::Debug for SidebarController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarController")
            .field("sidebar", &self.sidebar)
            .field("mobile_sidebar", &self.mobile_sidebar)
            .field("layout", &self.layout)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface + ?Sized> SidebarController<S> {
    pub const fn new(animator: Animator<S>, sidebar: ElementId, layout: LayoutFlags) -> Self {
        Self { animator, sidebar, mobile_sidebar: None, layout, duration: DEFAULT_SLIDE_DURATION }
    }

    #[must_use]
    pub const fn with_mobile_sidebar(mut self, element: ElementId) -> Self {
        self.mobile_sidebar = Some(element);
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutFlags {
        self.layout
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.layout.contains(LayoutFlags::SIDEBAR_COLLAPSED)
    }

    /// Collapses or expands the desktop sidebar.
    ///
    /// # Errors
    /// Returns [`mcs_animate::AnimateError::InvalidTarget`] if the sidebar is not attached.
    pub fn toggle(&mut self) -> Result<LayoutFlags> {
        let mut next = self.layout;
        next.toggle_sidebar();
        self.reveal(self.sidebar, !next.contains(LayoutFlags::SIDEBAR_COLLAPSED), self.duration)?;
        Ok(self.commit(next))
    }

    /// Opens or closes the mobile sidebar. Without a mobile element only the flags change.
    ///
    /// # Errors
    /// Returns [`mcs_animate::AnimateError::InvalidTarget`] if the mobile sidebar is not
    /// attached.
    pub fn toggle_mobile(&mut self) -> Result<LayoutFlags> {
        let mut next = self.layout;
        next.toggle_mobile_sidebar();
        if let Some(element) = self.mobile_sidebar {
            let open = next.contains(LayoutFlags::SIDEBAR_MOBILE_TOGGLED);
            self.reveal(element, open, self.duration)?;
        }
        Ok(self.commit(next))
    }

    /// Renders the current flags without animating, e.g. right after mount.
    ///
    /// # Errors
    /// Returns [`mcs_animate::AnimateError::InvalidTarget`] if a sidebar is not attached.
    pub fn sync(&self) -> Result<()> {
        self.reveal(self.sidebar, !self.is_collapsed(), Duration::ZERO)?;
        if let Some(element) = self.mobile_sidebar {
            let open = self.layout.contains(LayoutFlags::SIDEBAR_MOBILE_TOGGLED);
            self.reveal(element, open, Duration::ZERO)?;
        }
        Ok(())
    }

    fn reveal(&self, element: ElementId, visible: bool, duration: Duration) -> Result<()> {
        if visible {
            self.animator.slide_down(element, duration)
        } else {
            self.animator.slide_up(element, duration)
        }
    }

    fn commit(&mut self, next: LayoutFlags) -> LayoutFlags {
        debug!(from = self.layout.bits(), to = next.bits(), "Sidebar layout changed");
        self.layout = next;
        next
    }
}
