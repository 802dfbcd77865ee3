pub mod error;
pub mod fake;
pub mod fixtures;
pub mod notifier;
pub mod rest;

pub use error::TestError;
pub use fake::{Endpoint, FakeBackend, FakeResponse};
pub use notifier::RecordingNotifier;
pub use rest::RestTest;

pub mod prelude {
    pub use crate::{
        fixtures::factory, Endpoint, FakeBackend, FakeResponse, RecordingNotifier, RestTest, TestError,
    };
}
