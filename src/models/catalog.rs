//! Fixed catalogs the booking form offers. The persisted records reference
//! these by value, so the lists are append-only in practice.

/// The nine bookable slots of a working day, in display order.
pub const TIME_SLOTS: [&str; 9] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

pub const SERVICES: [&str; 8] = [
    "box-braids",
    "cornrows",
    "fulani-braids",
    "twist-styles",
    "goddess-braids",
    "senegalese-twists",
    "knotless-braids",
    "fulani-braids-premium",
];

pub const HAIR_LENGTHS: [&str; 4] = ["Short", "Medium", "Long", "Extra Long"];

pub const HAIR_TEXTURES: [&str; 4] = ["Fine", "Medium", "Thick", "Coarse"];

pub fn is_known_service(code: &str) -> bool {
    SERVICES.contains(&code)
}

pub fn is_known_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

pub fn is_known_hair_length(s: &str) -> bool {
    HAIR_LENGTHS.contains(&s)
}

pub fn is_known_hair_texture(s: &str) -> bool {
    HAIR_TEXTURES.contains(&s)
}

/// Human-readable service name, e.g. `box-braids` -> `box braids`.
pub fn service_display_name(code: &str) -> String {
    code.replace('-', " ")
}
