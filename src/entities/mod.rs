pub mod mechanic_profile;
pub mod service_request;
