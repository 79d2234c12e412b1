pub mod invitation;
pub mod navigator;
pub mod organization;
pub mod profile;
