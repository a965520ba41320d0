// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod key_cap;
pub mod key_names;
pub mod known_keys;

// Re-export.
pub use key_cap::*;
pub use key_names::*;
pub use known_keys::*;

/// The two lookup tables the classifier consults, in probe order.
#[derive(Debug, Clone, Default)]
pub struct KeyTables {
    pub key_cap: KeyCapTable,
    pub known_keys: KnownKeyTable,
}

impl KeyTables {
    #[must_use]
    pub fn new(key_cap: KeyCapTable) -> Self {
        Self {
            key_cap,
            known_keys: KnownKeyTable::new(),
        }
    }
}
