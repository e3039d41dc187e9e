// Text generation: cover letters, CV evaluation, interview preparation.
// All LLM calls go through the ChatModel trait in llm_client.

pub mod cover_letter;
pub mod evaluation;
pub mod handlers;
pub mod interview;
pub mod prompts;
