pub mod mock;
pub mod openai_client;
pub mod provider;

pub use mock::{MockProvider, RecordedCall};
pub use openai_client::OpenAiProvider;
pub use provider::CapabilityProvider;
