// Copy remixing: platform guides, prompt assembly and the relay handlers.
// The outbound call itself goes through llm_client.

pub mod handlers;
pub mod platforms;
pub mod prompts;
