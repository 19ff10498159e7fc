pub mod args;
pub mod commands;
pub mod console;
pub mod runner;

use ::console::Emoji;

pub(crate) static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
pub(crate) static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub(crate) static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
pub(crate) static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
pub(crate) static CART: Emoji<'_, '_> = Emoji("🛒 ", "");
