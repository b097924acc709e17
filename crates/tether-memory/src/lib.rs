pub mod channel_store;
pub mod identity;
mod keys;
pub mod thing_store;

pub use channel_store::InMemoryChannelRepository;
pub use identity::SequentialIdProvider;
pub use thing_store::InMemoryThingRepository;
