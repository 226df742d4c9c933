mod extract;
mod identifier;

pub use identifier::{DeviceIdStore, IdentifierNotFoundError, new_store};
