pub mod connection;
pub mod credential;
pub mod invitation;
