// Navigation bar behavior
//
// Scroll-coupled chrome: the navbar condenses once the page scrolls, a
// back-to-top control appears further down, and the progress indicator
// tracks scroll percent. The mobile menu is a class toggle that also locks
// page scrolling while open.

use log::debug;
use marquee_page::{ElementId, Page, Viewport};

pub const NAVBAR_CLASS: &str = "navbar";
pub const MENU_CLASS: &str = "nav-menu";
pub const MENU_TOGGLE_CLASS: &str = "mobile-menu-toggle";
pub const NAV_LINK_CLASS: &str = "nav-link";
pub const BACK_TO_TOP_CLASS: &str = "back-to-top";
pub const SCROLL_INDICATOR_CLASS: &str = "scroll-indicator";

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";
/// Root marker while the mobile menu holds the page still
pub const NO_SCROLL_CLASS: &str = "no-scroll";

const SCROLLED_AT: f32 = 50.0;
const BACK_TO_TOP_AT: f32 = 300.0;

/// Navigation chrome controller
pub struct Navigation {
    navbar: Option<ElementId>,
    menu: Option<ElementId>,
    toggle: Option<ElementId>,
    links: Vec<ElementId>,
    back_to_top: Option<ElementId>,
    indicator: Option<ElementId>,
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            navbar: None,
            menu: None,
            toggle: None,
            links: Vec::new(),
            back_to_top: None,
            indicator: None,
        }
    }

    /// Wire up whatever chrome the page has; missing pieces stay None and
    /// their behavior is skipped.
    pub fn init(&mut self, page: &Page) {
        self.navbar = page.first_class(NAVBAR_CLASS);
        self.menu = page.first_class(MENU_CLASS);
        self.toggle = page.first_class(MENU_TOGGLE_CLASS);
        self.links = page.select_class(NAV_LINK_CLASS);
        self.back_to_top = page.first_class(BACK_TO_TOP_CLASS);
        self.indicator = page.first_class(SCROLL_INDICATOR_CLASS);
        debug!(
            "Marquee: navigation wired (navbar: {}, back-to-top: {})",
            self.navbar.is_some(),
            self.back_to_top.is_some()
        );
    }

    /// Update scroll-coupled chrome. Runs on the throttled scroll path.
    pub fn on_scroll(&self, page: &mut Page, viewport: &Viewport) {
        if let Some(navbar) = self.navbar {
            if viewport.scroll_y > SCROLLED_AT {
                page.add_class(navbar, SCROLLED_CLASS);
            } else {
                page.remove_class(navbar, SCROLLED_CLASS);
            }
        }
        if let Some(button) = self.back_to_top {
            if viewport.scroll_y > BACK_TO_TOP_AT {
                page.add_class(button, SHOW_CLASS);
            } else {
                page.remove_class(button, SHOW_CLASS);
            }
        }
        if let Some(indicator) = self.indicator {
            let percent = viewport.scroll_percent();
            if let Some(el) = page.element_mut(indicator) {
                el.style.width_percent = Some(percent);
            }
        }
    }

    /// Route a click. Returns true when the click asked to scroll back to
    /// the top, which the runtime handles.
    pub fn on_click(&self, page: &mut Page, element: ElementId) -> bool {
        if Some(element) == self.back_to_top {
            self.close_menu(page);
            return true;
        }
        if Some(element) == self.toggle {
            self.toggle_menu(page);
            return false;
        }
        if self.links.contains(&element) {
            self.close_menu(page);
            return false;
        }
        // Clicks outside the navbar close an open menu
        if !self.is_inside_navbar(page, element) {
            self.close_menu(page);
        }
        false
    }

    pub fn toggle_menu(&self, page: &mut Page) {
        if self.menu_open(page) {
            self.close_menu(page);
        } else {
            self.open_menu(page);
        }
    }

    pub fn menu_open(&self, page: &Page) -> bool {
        self.menu
            .map(|menu| page.has_class(menu, ACTIVE_CLASS))
            .unwrap_or(false)
    }

    fn open_menu(&self, page: &mut Page) {
        let (Some(menu), Some(toggle)) = (self.menu, self.toggle) else {
            return;
        };
        page.add_class(menu, ACTIVE_CLASS);
        page.add_class(toggle, ACTIVE_CLASS);
        let root = page.root();
        page.add_class(root, NO_SCROLL_CLASS);
    }

    fn close_menu(&self, page: &mut Page) {
        if let Some(menu) = self.menu {
            page.remove_class(menu, ACTIVE_CLASS);
        }
        if let Some(toggle) = self.toggle {
            page.remove_class(toggle, ACTIVE_CLASS);
        }
        let root = page.root();
        page.remove_class(root, NO_SCROLL_CLASS);
    }

    fn is_inside_navbar(&self, page: &Page, element: ElementId) -> bool {
        let Some(navbar) = self.navbar else {
            return false;
        };
        let mut current = Some(element);
        while let Some(id) = current {
            if id == navbar {
                return true;
            }
            current = page.element(id).and_then(|el| el.parent);
        }
        false
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_page::Rect;

    struct Fixture {
        page: Page,
        nav: Navigation,
        navbar: ElementId,
        toggle: ElementId,
        menu: ElementId,
        link: ElementId,
        back_to_top: ElementId,
        indicator: ElementId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut page = Page::new();
            let navbar = page.create_with("nav", &[NAVBAR_CLASS], Rect::new(0.0, 0.0, 1200.0, 60.0));
            let toggle = page.create_with("button", &[MENU_TOGGLE_CLASS], Rect::default());
            let menu = page.create_with("ul", &[MENU_CLASS], Rect::default());
            let link = page.create_with("a", &[NAV_LINK_CLASS], Rect::default());
            let back_to_top = page.create_with("button", &[BACK_TO_TOP_CLASS], Rect::default());
            let indicator = page.create_with("div", &[SCROLL_INDICATOR_CLASS], Rect::default());
            page.append_child(navbar, toggle);
            page.append_child(navbar, menu);
            page.append_child(menu, link);

            let mut nav = Navigation::new();
            nav.init(&page);
            Self {
                page,
                nav,
                navbar,
                toggle,
                menu,
                link,
                back_to_top,
                indicator,
            }
        }

        fn scroll(&mut self, y: f32) {
            let mut viewport = Viewport::new(800.0, 2800.0);
            viewport.scroll_y = y;
            self.nav.on_scroll(&mut self.page, &viewport);
        }
    }

    #[test]
    fn test_navbar_condenses_past_threshold() {
        let mut fx = Fixture::new();
        fx.scroll(51.0);
        assert!(fx.page.has_class(fx.navbar, SCROLLED_CLASS));
        fx.scroll(10.0);
        assert!(!fx.page.has_class(fx.navbar, SCROLLED_CLASS));
    }

    #[test]
    fn test_back_to_top_visibility() {
        let mut fx = Fixture::new();
        fx.scroll(301.0);
        assert!(fx.page.has_class(fx.back_to_top, SHOW_CLASS));
        fx.scroll(100.0);
        assert!(!fx.page.has_class(fx.back_to_top, SHOW_CLASS));
    }

    #[test]
    fn test_indicator_tracks_scroll_percent() {
        let mut fx = Fixture::new();
        fx.scroll(1000.0);
        assert_eq!(
            fx.page.element(fx.indicator).unwrap().style.width_percent,
            Some(50.0)
        );
    }

    #[test]
    fn test_menu_toggle_and_close_on_link() {
        let mut fx = Fixture::new();
        let toggle = fx.toggle;
        let link = fx.link;
        fx.nav.on_click(&mut fx.page, toggle);
        assert!(fx.nav.menu_open(&fx.page));
        assert!(fx.page.has_class(fx.page.root(), NO_SCROLL_CLASS));

        fx.nav.on_click(&mut fx.page, link);
        assert!(!fx.nav.menu_open(&fx.page));
        assert!(!fx.page.has_class(fx.page.root(), NO_SCROLL_CLASS));
    }

    #[test]
    fn test_outside_click_closes_menu() {
        let mut fx = Fixture::new();
        let toggle = fx.toggle;
        fx.nav.on_click(&mut fx.page, toggle);
        assert!(fx.nav.menu_open(&fx.page));

        let outside = fx.page.create("div");
        fx.nav.on_click(&mut fx.page, outside);
        assert!(!fx.nav.menu_open(&fx.page));
    }

    #[test]
    fn test_click_inside_navbar_keeps_menu_open() {
        let mut fx = Fixture::new();
        let toggle = fx.toggle;
        let menu = fx.menu;
        fx.nav.on_click(&mut fx.page, toggle);
        fx.nav.on_click(&mut fx.page, menu);
        assert!(fx.nav.menu_open(&fx.page));
    }

    #[test]
    fn test_back_to_top_click_reported() {
        let mut fx = Fixture::new();
        let back_to_top = fx.back_to_top;
        assert!(fx.nav.on_click(&mut fx.page, back_to_top));
    }

    #[test]
    fn test_missing_chrome_is_noop() {
        let mut page = Page::new();
        let mut nav = Navigation::new();
        nav.init(&page);
        let el = page.create("div");
        let viewport = Viewport::new(800.0, 2000.0);
        nav.on_scroll(&mut page, &viewport);
        assert!(!nav.on_click(&mut page, el));
    }
}
