//! Interactive menu options.
//!
//! Commands must be unique across all menus.
pub type Menu = (&'static str, &'static [&'static str]);

// Command aliases. Keep this list in alphabetical order.
pub mod commands {
    pub const COMBINE_FILES: &str = "Combine saved snapshots";
    pub const COMBINE_LIVE: &str = "Combine live products and prices";
    pub const EXIT: &str = "Exit";
    pub const NAV_BACK: &str = "Back";
    pub const NAV_TO_BASEROW_MENU: &str = "Baserow Menu";
    pub const NAV_TO_LOJA_MENU: &str = "Loja Integrada Menu";
    pub const PROBE: &str = "Probe product API";
    pub const PROVISION: &str = "Provision product table";
    pub const SAVE_BASEROW_PROFILE: &str = "Save Baserow credentials";
    pub const SAVE_LOJA_PROFILE: &str = "Save Loja Integrada credentials";
    pub const SELF_TEST: &str = "Combiner self-test";
    pub const TEST_CONNECTION: &str = "Test Baserow connection";
    pub const VALIDATE: &str = "Validate saved snapshot";
}

use commands::*;

pub const TOP_MENU: [&str; 4] = [NAV_TO_LOJA_MENU, NAV_TO_BASEROW_MENU, SELF_TEST, EXIT];

pub const LOJA_MENU: [&str; 7] = [PROBE, VALIDATE, COMBINE_FILES, COMBINE_LIVE, SAVE_LOJA_PROFILE, NAV_BACK, EXIT];

pub const BASEROW_MENU: [&str; 5] = [TEST_CONNECTION, PROVISION, SAVE_BASEROW_PROFILE, NAV_BACK, EXIT];

pub fn top_menu() -> &'static Menu {
    &("Main", &TOP_MENU)
}

pub fn loja_menu() -> &'static Menu {
    &("Loja Integrada", &LOJA_MENU)
}

pub fn baserow_menu() -> &'static Menu {
    &("Baserow", &BASEROW_MENU)
}
