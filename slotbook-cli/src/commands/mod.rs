//! CLI command implementations.
//!
//! - `init`: Create the database and seed the inventory
//! - `book`: Book a resource for a person or team
//! - `cancel`: Cancel an active booking
//! - `bookings`: List bookings page by page
//! - `occupied`: List resources in use at an instant
//! - `available`: List resources free at a slot
//! - `rooms`: List the inventory
//! - `people`: List known persons
//! - `completions`: Generate shell completion scripts

pub mod available;
pub mod book;
pub mod bookings;
pub mod cancel;
pub mod completions;
pub mod init;
pub mod occupied;
pub mod people;
pub mod rooms;

pub use available::AvailableCommand;
pub use book::BookCommand;
pub use bookings::BookingsCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use occupied::OccupiedCommand;
pub use people::PeopleCommand;
pub use rooms::RoomsCommand;
