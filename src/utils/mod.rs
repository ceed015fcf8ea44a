pub mod constants;
pub mod domain_utils;

pub use constants::*;
pub use domain_utils::{is_hostname_char, is_strict_subdomain, normalize_domain};
