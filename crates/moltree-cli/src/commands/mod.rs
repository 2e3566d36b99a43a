pub mod lang;
pub mod lang_resolver;
pub mod tree;
pub mod verify;

#[cfg(test)]
mod lang_tests;
#[cfg(test)]
mod verify_tests;
