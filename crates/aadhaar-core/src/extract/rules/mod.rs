//! Rule-based field extractors for identity card text.

pub mod address;
pub mod contact;
pub mod dates;
pub mod gender;
pub mod identifier;
pub mod name;
pub mod normalize;
pub mod patterns;

pub use address::{extract_address, extract_components, extract_district, AddressComponents};
pub use contact::{extract_phone, extract_pincode};
pub use dates::extract_date_of_birth;
pub use gender::extract_gender;
pub use identifier::{extract_identifier, extract_virtual_id, format_identifier};
pub use name::{
    extract_bilingual_name, extract_fallback_name, extract_guardian_name, is_blacklisted,
    BilingualName, DEFAULT_BLACKLIST,
};
pub use normalize::{normalize_name, TextTransform};
