pub mod auth;
pub mod jobs;
pub mod pricing;

pub use auth::{AuthService, Destination, SignIn};
pub use jobs::{JobService, NewJob};
pub use pricing::{PricingService, Quote, QuoteLine};
