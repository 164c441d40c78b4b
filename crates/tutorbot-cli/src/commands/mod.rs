pub mod assess;
pub mod chat;
pub mod compare;
pub mod curriculum;
pub mod dashboard;
pub mod init;
pub mod lab;
pub mod learning_path;
pub mod validate;
