mod request;
mod response;

pub use request::LocateRequest;
pub use response::HealthResponse;
