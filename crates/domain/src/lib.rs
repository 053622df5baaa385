mod agent;
mod booking;
mod channel;
mod date;
mod delivery_log;
mod run_log;
mod shared;
mod template;
mod trigger;

pub use agent::{Agent, CalendarApiSettings, CalendarApiVersion};
pub use booking::{Booking, BookingStatus};
pub use channel::{Channel, GatewayKind};
pub use date::{format_instant, FormattedInstant, DEFAULT_TIMEZONE};
pub use delivery_log::{truncate_response, DeliveryLogEntry};
pub use run_log::{CycleCounters, RunLogEntry, RunSummary, SkipReason, TriggerRunDetail};
pub use shared::entity::{Entity, ID};
pub use template::render_template;
pub use trigger::{
    offset_to_millis, DestinationMode, DueStatus, OffsetUnit, ReminderTrigger, TriggerAction,
    WindowPolicy,
};
