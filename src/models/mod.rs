mod appointment;
mod notification;
mod state;
mod user;

pub use appointment::{Appointment, AppointmentSummary};
pub use notification::Notification;
pub use state::AppState;
pub use user::{ProviderProfile, User};
