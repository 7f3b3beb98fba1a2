pub mod contact;
pub mod home;
pub mod json_error;
pub mod project;
pub mod skill;
