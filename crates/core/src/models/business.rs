use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    pub is_active: bool,
}

/// Customer-facing booking policy knobs configured by the business owner.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Reject a new booking while the customer already has an upcoming
    /// BOOKED appointment with this business.
    #[serde(default)]
    pub limit_to_one_upcoming: bool,
}
