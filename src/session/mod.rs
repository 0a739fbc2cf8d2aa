//! Client-side state of a boat editing session: login, collection, selection,
//! edit buffer and pending notifications.

pub mod controller;
pub mod form;
pub mod list;
pub mod login;
pub mod notify;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Intent, SessionController, fetch_boats};
pub use form::{BoatForm, FormField, FormState};
pub use list::{BoatList, ListEntry, NEW_ENTRY_LABEL, entries};
pub use login::{LoginFlow, LoginState, UNAUTHORIZED_MESSAGE};
pub use notify::{Notice, NoticeLevel, Notifications};
