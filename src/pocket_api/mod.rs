pub mod client;
pub mod credentials;
pub mod normalize;
pub mod query;
mod scalar;
pub mod transport;
pub mod types;

pub const RETRIEVE_URL: &str = "https://getpocket.com/v3/get";

mod headers {
    pub const X_ACCEPT: &str = "X-Accept";
    pub const APPLICATION_JSON: &str = "application/json";
}
