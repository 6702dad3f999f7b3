pub mod adventure;
pub mod game;
pub mod json_file;
pub mod knowledge;
pub mod lead;
pub mod persona;
pub mod resolver;
pub mod scene;
pub mod sdr;
pub mod store;
pub mod world;

/// Represents commands that the tool services issue to the hosting runtime.
///
/// The services never end a call themselves; they tell whoever is driving
/// the conversation that the persona considers its job done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Command indicating the session is complete, with a final message.
    SessionComplete(String),
}
