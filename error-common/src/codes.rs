// Error codes implementation
// Stable identifiers attached to every ClinicError, used in logs

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod authentication {
    pub const NOT_SIGNED_IN: &str = "AUTH_2001";
    pub const IDENTITY_PROVIDER: &str = "AUTH_2002";
}

pub mod store {
    pub const NOT_FOUND: &str = "STORE_4001";
    pub const REQUEST_FAILED: &str = "STORE_4002";
    pub const NETWORK: &str = "STORE_4003";
}

pub mod system {
    pub const DOCUMENT: &str = "SYS_5001";
    pub const CONFIGURATION: &str = "SYS_5002";
    pub const IO: &str = "SYS_5003";
    pub const INTERNAL: &str = "SYS_5999";
}
