pub mod contact_message;
pub mod project;
pub mod seed;
pub mod skill;
pub mod validation;
