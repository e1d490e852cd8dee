// Message center
//
// Routes status messages into a shared page container. Each message is an
// alert element that auto-dismisses after a few seconds; dismissing an
// already-removed message is a no-op.

use crate::scheduler::{Scheduler, Task};
use marquee_page::{ElementId, Page};
use marquee_utils::StatusMessage;
use std::collections::HashMap;
use std::time::Duration;

pub const CONTAINER_CLASS: &str = "messages-container";
pub const ALERT_CLASS: &str = "alert";

const AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// Page-level status message routing
pub struct MessageCenter {
    container: Option<ElementId>,
    active: HashMap<ElementId, StatusMessage>,
}

impl MessageCenter {
    pub fn new() -> Self {
        Self {
            container: None,
            active: HashMap::new(),
        }
    }

    /// Show a message, creating the shared container on first use.
    /// Auto-dismissal is scheduled immediately.
    pub fn show(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        message: StatusMessage,
    ) -> ElementId {
        let container = self.ensure_container(page);
        let alert = page.create("div");
        page.add_class(alert, ALERT_CLASS);
        page.add_class(alert, message.style.css_class());
        page.set_text(alert, format!("{} {}", message.style.icon(), message.text));
        page.append_child(container, alert);
        scheduler.schedule_after(AUTO_DISMISS, Task::DismissMessage(alert));
        self.active.insert(alert, message);
        alert
    }

    /// Remove a message element (auto-dismiss or user close)
    pub fn dismiss(&mut self, page: &mut Page, alert: ElementId) {
        if self.active.remove(&alert).is_some() {
            page.remove(alert);
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn message_at(&self, alert: ElementId) -> Option<&StatusMessage> {
        self.active.get(&alert)
    }

    /// Most recently shown message still on screen
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.active
            .iter()
            .max_by_key(|(alert, _)| alert.0)
            .map(|(_, message)| message)
    }

    pub fn clear(&mut self, page: &mut Page) {
        let alerts: Vec<ElementId> = self.active.keys().copied().collect();
        for alert in alerts {
            self.dismiss(page, alert);
        }
    }

    fn ensure_container(&mut self, page: &mut Page) -> ElementId {
        if let Some(container) = self.container {
            if page.contains(container) {
                return container;
            }
        }
        let container = page
            .first_class(CONTAINER_CLASS)
            .unwrap_or_else(|| {
                let created = page.create("div");
                page.add_class(created, CONTAINER_CLASS);
                let root = page.root();
                page.append_child(root, created);
                created
            });
        self.container = Some(container);
        container
    }
}

impl Default for MessageCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Moment;
    use marquee_utils::MessageStyle;

    #[test]
    fn test_show_creates_container_once() {
        let mut page = Page::new();
        let mut scheduler = Scheduler::new();
        let mut center = MessageCenter::new();

        let first = center.show(
            &mut page,
            &mut scheduler,
            StatusMessage::success("Subscribed"),
        );
        let second = center.show(&mut page, &mut scheduler, StatusMessage::error("Nope"));

        assert_eq!(page.select_class(CONTAINER_CLASS).len(), 1);
        let container = page.first_class(CONTAINER_CLASS).unwrap();
        assert_eq!(page.children(container), vec![first, second]);
        assert!(page.has_class(first, "alert-success"));
        assert!(page.has_class(second, "alert-error"));
        assert!(page.text(first).contains("Subscribed"));
        assert_eq!(center.active_count(), 2);
    }

    #[test]
    fn test_auto_dismiss_scheduled() {
        let mut page = Page::new();
        let mut scheduler = Scheduler::new();
        let mut center = MessageCenter::new();

        let alert = center.show(
            &mut page,
            &mut scheduler,
            StatusMessage::warning("Heads up"),
        );
        let (due, task) = scheduler.pop_due(Moment::from_millis(10_000)).unwrap();
        assert_eq!(due, Moment::from_millis(5000));
        assert_eq!(task, Task::DismissMessage(alert));

        center.dismiss(&mut page, alert);
        assert!(!page.contains(alert));
        assert_eq!(center.active_count(), 0);
    }

    #[test]
    fn test_dismiss_twice_is_noop() {
        let mut page = Page::new();
        let mut scheduler = Scheduler::new();
        let mut center = MessageCenter::new();

        let alert = center.show(&mut page, &mut scheduler, StatusMessage::error("E"));
        center.dismiss(&mut page, alert);
        center.dismiss(&mut page, alert);
        assert_eq!(center.active_count(), 0);
    }

    #[test]
    fn test_latest() {
        let mut page = Page::new();
        let mut scheduler = Scheduler::new();
        let mut center = MessageCenter::new();

        center.show(&mut page, &mut scheduler, StatusMessage::error("first"));
        center.show(&mut page, &mut scheduler, StatusMessage::success("second"));
        let latest = center.latest().unwrap();
        assert_eq!(latest.style, MessageStyle::Success);
        assert_eq!(latest.text, "second");
    }
}
