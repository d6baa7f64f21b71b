// Form controller: the state container the front end drives.

pub mod controller;

pub use controller::{FormController, SubmitBlocked, SubmitReport};
