// Dark-mode toggle
//
// An explicit user choice is persisted and wins forever; otherwise the
// system preference applies, and later system changes follow along. The
// active theme is published to stylesheets as a root marker class plus a
// `data-theme` attribute.

use log::debug;
use marquee_page::{ElementId, Page};
use marquee_utils::{PreferenceStore, Theme};

pub const DARK_CLASS: &str = "dark";
pub const THEME_ATTR: &str = "data-theme";
pub const TOGGLE_CLASS: &str = "theme-toggle";

use crate::navigation::MENU_CLASS;

/// Theme state and its page markers
pub struct ThemeController {
    store: PreferenceStore,
    system: Theme,
}

impl ThemeController {
    pub fn new(store: PreferenceStore, system: Theme) -> Self {
        Self { store, system }
    }

    /// Apply the resolved theme and make sure a toggle control exists in
    /// the navigation menu (when the page has one).
    pub fn init(&mut self, page: &mut Page) {
        let theme = self.resolve();
        self.apply(page, theme);

        if page.first_class(TOGGLE_CLASS).is_none() {
            if let Some(menu) = page.first_class(MENU_CLASS) {
                let toggle = page.create("button");
                page.add_class(toggle, TOGGLE_CLASS);
                page.set_attr(toggle, "aria-label", "Toggle dark mode");
                page.append_child(menu, toggle);
                debug!("Marquee: created theme toggle in nav menu");
            }
        }
    }

    /// Stored choice wins; the system preference is the default
    pub fn resolve(&self) -> Theme {
        self.store.theme().unwrap_or(self.system)
    }

    /// Flip the theme as an explicit user choice (persisted)
    pub fn toggle(&mut self, page: &mut Page) -> Theme {
        let next = self.resolve().toggled();
        self.choose(page, next);
        next
    }

    /// Persist an explicit choice and apply it
    pub fn choose(&mut self, page: &mut Page, theme: Theme) {
        self.store.set_theme(theme);
        self.apply(page, theme);
    }

    /// Follow a system preference change unless the user already chose
    pub fn on_system_change(&mut self, page: &mut Page, dark: bool) {
        self.system = if dark { Theme::Dark } else { Theme::Light };
        if self.store.theme().is_none() {
            self.apply(page, self.system);
        }
    }

    /// Set the page markers without persisting anything
    pub fn apply(&self, page: &mut Page, theme: Theme) {
        let root = page.root();
        match theme {
            Theme::Dark => page.add_class(root, DARK_CLASS),
            Theme::Light => page.remove_class(root, DARK_CLASS),
        }
        page.set_attr(root, THEME_ATTR, theme.to_string());
        debug!("Marquee: applied {} theme", theme);
    }

    pub fn is_toggle(&self, page: &Page, element: ElementId) -> bool {
        page.has_class(element, TOGGLE_CLASS)
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied_theme(page: &Page) -> Option<String> {
        page.attr(page.root(), THEME_ATTR).map(String::from)
    }

    #[test]
    fn test_system_preference_is_default() {
        let mut page = Page::new();
        let mut controller = ThemeController::new(PreferenceStore::in_memory(), Theme::Dark);
        controller.init(&mut page);

        assert!(page.has_class(page.root(), DARK_CLASS));
        assert_eq!(applied_theme(&page).as_deref(), Some("dark"));
        // Following the system does not count as an explicit choice
        assert_eq!(controller.store().theme(), None);
    }

    #[test]
    fn test_stored_choice_wins_over_system() {
        let mut store = PreferenceStore::in_memory();
        store.set_theme(Theme::Light);
        let mut page = Page::new();
        let mut controller = ThemeController::new(store, Theme::Dark);
        controller.init(&mut page);

        assert!(!page.has_class(page.root(), DARK_CLASS));
        assert_eq!(applied_theme(&page).as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_persists_choice() {
        let mut page = Page::new();
        let mut controller = ThemeController::new(PreferenceStore::in_memory(), Theme::Light);
        controller.init(&mut page);

        assert_eq!(controller.toggle(&mut page), Theme::Dark);
        assert!(page.has_class(page.root(), DARK_CLASS));
        assert_eq!(controller.store().theme(), Some(Theme::Dark));

        assert_eq!(controller.toggle(&mut page), Theme::Light);
        assert!(!page.has_class(page.root(), DARK_CLASS));
    }

    #[test]
    fn test_system_change_respected_until_user_chooses() {
        let mut page = Page::new();
        let mut controller = ThemeController::new(PreferenceStore::in_memory(), Theme::Light);
        controller.init(&mut page);

        controller.on_system_change(&mut page, true);
        assert!(page.has_class(page.root(), DARK_CLASS));

        // Explicit choice pins the theme
        controller.choose(&mut page, Theme::Light);
        controller.on_system_change(&mut page, true);
        assert!(!page.has_class(page.root(), DARK_CLASS));
    }

    #[test]
    fn test_toggle_created_in_menu() {
        let mut page = Page::new();
        let menu = page.create("ul");
        page.add_class(menu, MENU_CLASS);

        let mut controller = ThemeController::new(PreferenceStore::in_memory(), Theme::Light);
        controller.init(&mut page);

        let toggle = page.first_class(TOGGLE_CLASS).unwrap();
        assert!(page.children(menu).contains(&toggle));
        assert!(controller.is_toggle(&page, toggle));
    }
}
