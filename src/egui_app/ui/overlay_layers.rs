use eframe::egui::Order;

/// Stacking tiers of the widget above the host UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OverlayLayer {
    Trigger,
    Notifications,
    /// Modal window and its dimming backdrop; covers the trigger.
    Modal,
}

impl OverlayLayer {
    pub(super) fn order(self) -> Order {
        match self {
            Self::Trigger | Self::Notifications => Order::Foreground,
            Self::Modal => Order::Tooltip,
        }
    }
}
