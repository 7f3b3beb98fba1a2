pub mod contact;
pub mod notification;
pub mod project;
pub mod seed;
pub mod skill;
