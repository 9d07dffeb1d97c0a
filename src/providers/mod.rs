pub mod api;
pub mod util;

pub use api::ApiService;
pub use util::RetryPolicy;
