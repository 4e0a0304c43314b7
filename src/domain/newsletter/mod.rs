//! Newsletter module - the email value object behind the subscription stub.

mod email;

pub use email::EmailAddress;
