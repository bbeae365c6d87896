//=========================================================================
// Base Screens
//=========================================================================
//
// Reusable screens built on the screen stack: menus, a confirmation
// popup and a static background.
//
//=========================================================================

//=== Module Declarations =================================================

mod background;
mod menu;
mod message_box;

//=== Public API ==========================================================

pub use background::BackgroundScreen;
pub use menu::{MenuController, MenuEntry, MenuEvent, MenuEventKind, MenuLayout, MenuScreen};
pub use message_box::{MessageBoxEvent, MessageBoxScreen};
