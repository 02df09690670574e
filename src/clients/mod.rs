pub mod asset_consumer;
pub mod asset_owner;
pub mod connected_asset;
pub mod platform;

pub use asset_consumer::AssetConsumer;
pub use asset_owner::{AssetOrigin, AssetOwner, OwnerType};
pub use connected_asset::ConnectedAsset;
pub use platform::Platform;
