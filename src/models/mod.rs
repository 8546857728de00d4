pub mod event_participants;
pub mod events;
pub mod follows;
pub mod users;

pub use event_participants::EventParticipantRow;
pub use events::EventRow;
pub use follows::FollowRow;
pub use users::{NearbyUserRow, UserRow};
