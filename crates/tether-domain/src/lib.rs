pub mod auth;
pub mod channel;
pub mod channel_service;
pub mod error;
pub mod identity;
pub mod repository;
pub mod thing;
pub mod thing_service;
pub mod validation;

pub use auth::Authenticator;
pub use channel::Channel;
pub use channel_service::ChannelService;
pub use error::{DomainError, DomainResult};
pub use identity::{IdentityProvider, XidProvider};
pub use repository::{ChannelRepository, ThingRepository};
pub use thing::Thing;
pub use thing_service::ThingService;
