pub mod access;
pub mod code;
pub mod jwt;
pub mod pwd;
pub mod record_id;
pub mod time;
pub mod validated_form;
pub mod validator;
