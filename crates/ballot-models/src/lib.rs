pub mod choice;
pub mod question;
pub mod user;
pub mod vote;

pub use choice::Choice;
pub use question::Question;
pub use user::User;
pub use vote::Vote;
