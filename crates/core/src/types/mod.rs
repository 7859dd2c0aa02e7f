//! Shared type definitions.
//!
//! Everything here is plain data: serde-friendly, clonable, and free of I/O.

pub mod cleaning;
pub mod content;
pub mod debounce;
pub mod facility;
pub mod id;
pub mod password;
pub mod payment;
pub mod price;
pub mod room;
pub mod status;
pub mod user;

pub use cleaning::{CleaningAreas, CleaningAssignment};
pub use content::{Announcement, Faq, Rule};
pub use debounce::Debouncer;
pub use facility::FacilityList;
pub use id::{AnnouncementId, FaqId, RoomId, RuleId, UserId};
pub use password::{PasswordPolicyError, PasswordRule, validate_password};
pub use payment::{PaymentRecord, UNOCCUPIED_TENANT};
pub use price::Rupiah;
pub use room::Room;
pub use status::{CleaningTime, PaymentStatus, Role, RoomStatus};
pub use user::User;
