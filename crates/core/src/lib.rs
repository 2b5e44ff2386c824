pub mod services;

pub use services::ApplicationService;
