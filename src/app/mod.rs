// Presentation layer: console command mapping, report renderers and the
// interactive session. No flight rules live here.

pub mod commands;
pub mod render;
pub mod session;
