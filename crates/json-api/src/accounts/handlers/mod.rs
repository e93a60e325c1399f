//! Account Handlers

pub(crate) mod admin;
pub(crate) mod authenticated;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod preferences;
pub(crate) mod register;
pub(crate) mod verify_password;
