pub mod settings_routes;
pub mod reminder_routes;
