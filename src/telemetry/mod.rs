pub mod config;
pub mod ctx;
pub mod emit;
mod macros;
pub mod ops;

use ctx::LogCtx;

pub fn init() -> LogCtx<ops::init::Init> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn sync() -> LogCtx<ops::sync::SyncOp> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn records() -> LogCtx<ops::records::Records> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
