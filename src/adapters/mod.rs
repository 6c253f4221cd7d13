// Adapters layer: concrete implementations for external systems (rpc, storage, files).

pub mod csv_source;
pub mod rpc;
pub mod storage;
pub mod store;

pub use rpc::RpcExpirationOracle;
pub use storage::LocalStorage;
pub use store::JsonResultStore;
