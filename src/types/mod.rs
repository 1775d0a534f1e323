mod notification;
mod payment_status;

pub use notification::{
    Notification, NotificationKind, NotificationStatus,
};
pub use payment_status::PaymentStatus;
