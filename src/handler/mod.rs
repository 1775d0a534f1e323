mod notifier;

pub use notifier::{
    notification_task, run_notification_cycle, NotificationCenter,
};
