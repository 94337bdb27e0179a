pub mod ids;
pub mod mailbox;
