mod application;

pub use application::ApplicationService;
